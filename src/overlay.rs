//! Text overlay driven by the loading flag.
//!
//! Presentation only: it listens for `start` / `stop` and never touches the
//! store's counters.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use colored::*;

use loadwatch::config::{Animation, OverlayConfig};
use loadwatch::{LoadingEventKind, LoadingStore};

pub struct TextOverlay {
    config: OverlayConfig,
    quiet: bool,
    visible: AtomicBool,
    shown: AtomicUsize,
}

impl TextOverlay {
    pub fn new(config: OverlayConfig, quiet: bool) -> Arc<Self> {
        Arc::new(Self {
            config,
            quiet,
            visible: AtomicBool::new(false),
            shown: AtomicUsize::new(0),
        })
    }

    /// Subscribe to `store` and sync with its current state.
    pub fn attach(self: &Arc<Self>, store: &LoadingStore) {
        let on_start = Arc::clone(self);
        let on_stop = Arc::clone(self);
        store
            .on(LoadingEventKind::Start, move |_| on_start.set_visible(true))
            .on(LoadingEventKind::Stop, move |_| on_stop.set_visible(false));

        if store.is_global_loading() {
            self.set_visible(true);
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// How many times the overlay has been shown.
    pub fn times_shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    fn set_visible(&self, visible: bool) {
        if self.visible.swap(visible, Ordering::SeqCst) == visible {
            return;
        }
        if visible {
            self.shown.fetch_add(1, Ordering::SeqCst);
        }
        log::debug!(
            "Overlay {} ({:?}, {}ms)",
            if visible { "shown" } else { "hidden" },
            self.config.animation,
            self.config.duration_ms
        );
        if !self.quiet {
            println!("{}", self.banner(visible));
        }
    }

    pub fn banner(&self, visible: bool) -> String {
        if !visible {
            return format!("{} overlay hidden", "[done]".green());
        }
        let message = &self.config.message;
        let framed = match self.config.animation {
            Animation::Fade => format!("░▒▓ {} ▓▒░", message),
            Animation::Zoom => format!(">>> {} <<<", message),
            Animation::Slide => format!("──▶ {}", message),
            Animation::None => message.to_string(),
        };
        framed.cyan().bold().to_string()
    }
}
