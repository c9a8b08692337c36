#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

#[allow(unused_imports)]
use crypto_dashboard::{
    Cli, // The struct from lib.rs
    CoinGeckoClient,
    FetchPolicy,
    HttpFetchContext,
    run_app, // The function from lib.rs
    ui::config::UI_TEXT,
};

// --- WASM SPECIFIC CODE ---
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// This keeps the WASM memory allocator from being stripped
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn _keep_alive() {}

// The browser entry point is `start`; the binary target still needs a main()
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
    use std::sync::Arc;

    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    log::info!("Crypto dashboard starting in WASM mode...");

    let web_options = eframe::WebOptions::default();
    let policy = FetchPolicy::default();
    let source = Arc::new(
        CoinGeckoClient::new(&policy).map_err(|e| JsValue::from_str(&e.to_string()))?,
    );

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or("no document on the global window")?;

    let canvas = document
        .get_element_by_id("the_canvas_id")
        .ok_or("failed to find canvas with id 'the_canvas_id'")?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| "the_canvas_id was not a valid HtmlCanvasElement")?;

    eframe::WebRunner::new()
        .start(
            canvas,
            web_options,
            Box::new(move |cc| {
                let fetch_ctx = HttpFetchContext::new(source).with_repaint(cc.egui_ctx.clone());
                Ok(run_app(cc, Box::new(fetch_ctx), &policy))
            }),
        )
        .await
}

// --- NATIVE SPECIFIC CODE ---
#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use clap::Parser;
    use eframe::NativeOptions;
    use std::sync::Arc;
    use tokio::runtime::Runtime;

    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panicked: {:?}", panic_info);
    }));
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Cli::parse();
    #[cfg(debug_assertions)]
    log::info!("Parsed arguments: {:?}", args);

    let policy = args.fetch_policy();

    // Requests run here; the UI thread only polls promises
    let rt = Runtime::new().context("Failed to create Tokio runtime")?;
    let source = Arc::new(CoinGeckoClient::new(&policy).context("Failed to build HTTP client")?);
    let handle = rt.handle().clone();

    eframe::run_native(
        UI_TEXT.window_title,
        NativeOptions::default(),
        Box::new(move |cc| {
            let fetch_ctx = HttpFetchContext::new(source, handle).with_repaint(cc.egui_ctx.clone());
            Ok(run_app(cc, Box::new(fetch_ctx), &policy))
        }),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed to start: {e}"))?;

    log::info!("Crypto dashboard closed");
    Ok(())
}
