//! UDS Wallet - A TUI client for buying UDS tokens through an external EVM wallet.
//!
//! This library provides:
//! - A wallet session adapter over an EIP-1193 style JSON-RPC wallet
//! - Token balance reading and purchase submission against the UDS contract
//! - Address and unit formatting helpers

pub mod action;
pub mod config;
pub mod domain;
pub mod infra;
