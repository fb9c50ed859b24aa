pub mod rest;
pub mod rpc;
