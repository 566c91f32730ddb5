pub mod alert;
pub mod config;
pub mod ec2_instance_client;
pub mod error;
pub mod logging;
pub mod notification;
pub mod output;
pub mod relay_handler;
pub mod severity;
pub mod slack;
pub mod stop_handler;
pub mod webhook;
