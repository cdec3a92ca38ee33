//! External service integrations

pub mod odoo;
