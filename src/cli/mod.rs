pub mod commands;
pub mod dispatch;
pub mod grammar;
pub mod handlers;
pub mod output;
