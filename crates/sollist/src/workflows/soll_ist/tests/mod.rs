mod common;
mod engine;
