use crate::fetch::HttpFetcher;
use lanecore::poll::{ClockTicker, DashboardConfig, DataPoller};
use lanecore::view::Handle;
use lanecore::{Surface, TimeSource};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

/// Forwards `log` records to the browser console.
struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&record.args().to_string());
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

fn install_logger() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(LevelFilter::Info);
    }
}

/// Writes into the host page by element id. Missing elements are skipped.
struct DomSurface {
    document: Document,
}

impl DomSurface {
    fn new(document: Document) -> Self {
        Self { document }
    }
}

impl Surface for DomSurface {
    fn set_text(&mut self, handle: Handle, text: &str) {
        if let Some(element) = self.document.get_element_by_id(handle.id()) {
            element.set_text_content(Some(text));
        }
    }

    fn set_width(&mut self, handle: Handle, width: &str) {
        let Some(element) = self
            .document
            .get_element_by_id(handle.id())
            .and_then(|element| element.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if let Err(err) = element.style().set_property("width", width) {
            warn!("{}: width {} rejected: {:?}", handle, width, err);
        }
    }
}

/// Host-locale time of day from `Date.prototype.toLocaleTimeString`.
struct BrowserClock;

impl TimeSource for BrowserClock {
    fn time_of_day(&self) -> String {
        js_sys::Date::new_0().to_locale_time_string("default").into()
    }
}

/// `<meta name="api-url" content="...">` overrides the default endpoint.
fn read_config(document: &Document) -> DashboardConfig {
    let url = document
        .query_selector("meta[name=\"api-url\"]")
        .ok()
        .flatten()
        .and_then(|meta| meta.get_attribute("content"));
    DashboardConfig::default().override_api_url(url.as_deref())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    install_logger();
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("dashboard needs a window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("dashboard needs a document"))?;

    let config = read_config(&document);
    info!("polling {} every {:?}", config.api_url, config.tick_period());
    let period_ms = i32::try_from(config.tick_period().as_millis()).unwrap_or(1000);

    let clock = ClockTicker::new(BrowserClock);
    let clock_tick = {
        let document = document.clone();
        move || clock.tick(&mut DomSurface::new(document.clone()))
    };

    let poller = Rc::new(DataPoller::new(HttpFetcher::new(), &config));
    let poll_tick = move || spawn_poll(Rc::clone(&poller), document.clone());

    clock_tick();
    poll_tick();
    schedule(&window, clock_tick, period_ms)?;
    schedule(&window, poll_tick, period_ms)?;
    Ok(())
}

/// Starts one poll without waiting for earlier ones to finish.
fn spawn_poll(poller: Rc<DataPoller<HttpFetcher>>, document: Document) {
    wasm_bindgen_futures::spawn_local(async move {
        let outcome = poller.fetch().await;
        poller.complete(outcome, &mut DomSurface::new(document));
    });
}

fn schedule(window: &Window, tick: impl FnMut() + 'static, period_ms: i32) -> Result<i32, JsValue> {
    let closure = Closure::<dyn FnMut()>::new(tick);
    let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
        closure.as_ref().unchecked_ref(),
        period_ms,
    )?;
    // The interval lives as long as the page does.
    closure.forget();
    Ok(id)
}
