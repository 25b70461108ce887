#![allow(dead_code)]

pub mod evalview_env;
pub mod http;
pub mod media;
