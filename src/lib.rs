//! # amqp-consume
//! Consume messages from an AMQP queue and pipe each message body to a command.
//!
//! For every delivery a fresh subprocess is spawned from a fixed argv
//! template; the message body is written to its standard input and the
//! subprocess's combined stdout/stderr is forwarded to this process's
//! standard output, in delivery order.

pub mod cli;
pub mod command;
pub mod consumer;
pub mod error;

// Re-export key components for easy access
pub use cli::Cli;
pub use consumer::{Consumer, ConsumerConfig};
pub use error::ConsumerError;
