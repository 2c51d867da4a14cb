//! # IO Module
//!
//! Interface layer exposing backend functionality over HTTP.

pub mod rest;
