//! Crossprint demo
//!
//! Builds a headless page with a dashboard and an invoice widget, mounts a
//! printer on the invoice and triggers it through the print signal.
//! An optional argument names a JSON file with printer settings.
//! Set `RUST_LOG=debug` to see the library's events.

use anyhow::{Context, Result};
use crossprint::{LogLevel, PrinterMount, PrinterOptions, PrinterSettings};
use dom::{Element, FontFace, Window};

fn main() -> Result<()> {
    crossprint::logging::init();

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {path}"))?;
            PrinterSettings::from_json(&json).context("Invalid printer settings")?
        }
        None => PrinterSettings {
            title: Some("Invoice #1042".to_string()),
            page_style: Some("@page { size: A4; margin: 12mm }".to_string()),
            log_level: LogLevel::Debug,
            ..PrinterSettings::default()
        },
    };

    let window = Window::new();
    let invoice = build_page(&window)?;
    tracing::info!(title = %window.document().title(), "Page ready");

    let mut mount = PrinterMount::new(window.clone(), PrinterOptions::new(settings));
    mount.mount(invoice).context("Failed to mount printer")?;

    if !mount.print() {
        anyhow::bail!("print signal was cancelled");
    }

    for (index, request) in window.print_requests().iter().enumerate() {
        println!("print #{}", index + 1);
        println!("  surface title: {}", request.document_title);
        println!("  page title:    {}", request.top_level_title);
        println!("  content:       {}", request.body_text);
    }
    println!("title after print: {}", window.document().title());

    mount.unmount();
    Ok(())
}

fn build_page(window: &Window) -> Result<Element> {
    let document = window.document();
    document.set_title("Billing dashboard");

    let theme = document.create_element("style");
    theme.set_id("theme");
    theme.set_text_content("body { font-family: Inter, sans-serif }")?;
    document.head().append_child(&theme)?;

    if let Some(fonts) = document.fonts() {
        fonts.register_from_css(FontFace::new("Inter", "url(/fonts/inter.woff2)"));
        fonts.add(FontFace::new("Mono", "local(Mono)"))?;
    }

    let nav = document.create_element("nav");
    nav.append_text("Home | Invoices | Settings")?;
    document.body().append_child(&nav)?;

    let invoice = document.create_element("section");
    invoice.set_id("invoice");
    for line in ["Consulting: 1200.00", "Hosting: 80.00", "Total: 1280.00"] {
        let row = document.create_element("p");
        row.append_text(line)?;
        invoice.append_child(&row)?;
    }
    document.body().append_child(&invoice)?;
    Ok(invoice)
}
