#![allow(warnings)]
//! Gift Registry Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod logger;
mod pages;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    logger::init();
    mount_to_body(App);
}
