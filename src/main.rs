mod carousel;
mod config;
mod contact;
mod data_client;
mod easter_eggs;
mod error;
mod hooks;
mod models;
mod render;
mod routes;
mod scroll_reveal;
mod theme;
mod transitions;

fn main() {
    dioxus::launch(routes::App);
}
