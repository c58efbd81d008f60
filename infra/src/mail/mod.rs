//! Outbound mail providers

pub mod sendgrid;

pub use sendgrid::SendGridMailSender;
