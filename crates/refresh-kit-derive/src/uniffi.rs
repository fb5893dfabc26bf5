//! UniFFI wrapper generation for RefreshView
//!
//! Generates `{Prefix}RefreshView` with `#[uniffi::Object]` and `#[uniffi::export]`
//!
//! The wrapper owns a `RefreshView` behind a mutex. After each call it releases
//! the lock, forwards the host updates to a native viewport callback, then runs
//! the trigger callbacks recorded during the call.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::Ident;

pub fn generate(prefix: &Ident, refresh_view_name: &Ident) -> TokenStream {
    let indicator_callback = format_ident!("{}IndicatorCallback", prefix);
    let trigger_callback = format_ident!("{}TriggerCallback", prefix);
    let viewport_callback = format_ident!("{}ViewportCallback", prefix);

    quote! {
        /// Native indicator view driven by the trigger machines
        #[cfg(feature = "uniffi")]
        #[::uniffi::export(callback_interface)]
        pub trait #indicator_callback: Send + Sync {
            fn width(&self) -> f64;
            fn height(&self) -> f64;
            fn set_frame(&self, x: f64, y: f64, width: f64, height: f64);
            fn set_hidden(&self, hidden: bool);
            fn set_progress(&self, progress: f64);
            fn start_refreshing(&self);
            fn end_refreshing(&self);
            fn resume(&self);
        }

        /// Invoked when an edge triggers, after the view is unlocked. May call
        /// back into the view, including `end_refreshing`.
        #[cfg(feature = "uniffi")]
        #[::uniffi::export(callback_interface)]
        pub trait #trigger_callback: Send + Sync {
            fn on_trigger(&self);
        }

        /// Receives writes to apply to the native scroll view
        #[cfg(feature = "uniffi")]
        #[::uniffi::export(callback_interface)]
        pub trait #viewport_callback: Send + Sync {
            fn set_content_offset(&self, x: f64, y: f64);
            fn set_content_inset(&self, top: f64, left: f64, bottom: f64, right: f64, animation_seconds: Option<f64>);
            fn set_always_bounce_vertical(&self, enabled: bool);
        }

        #[cfg(feature = "uniffi")]
        mod __uniffi_refresh_view {
            use super::*;
            use ::std::collections::HashMap;
            use ::std::sync::{Arc, Mutex};
            use ::refresh_kit::{Edge, EdgeInsets, HostUpdate, PendingTriggers, Point, Rect, RefreshView, Size, Viewport};

            struct IndicatorBridge(Box<dyn #indicator_callback>);

            impl ::refresh_kit::RefreshIndicator for IndicatorBridge {
                fn size(&self) -> Size {
                    Size::new(self.0.width(), self.0.height())
                }

                fn set_frame(&mut self, frame: Rect) {
                    self.0.set_frame(frame.origin.x, frame.origin.y, frame.size.width, frame.size.height);
                }

                fn set_hidden(&mut self, hidden: bool) {
                    self.0.set_hidden(hidden);
                }

                fn set_progress(&mut self, progress: f64) {
                    self.0.set_progress(progress);
                }

                fn start_refreshing(&mut self) {
                    self.0.start_refreshing();
                }

                fn end_refreshing(&mut self) {
                    self.0.end_refreshing();
                }

                fn resume(&mut self) {
                    self.0.resume();
                }
            }

            /// UniFFI wrapper for RefreshView
            ///
            /// Unknown edge names ("leading"/"top", "trailing"/"bottom") are ignored.
            #[derive(::uniffi::Object)]
            pub struct #refresh_view_name {
                inner: Mutex<RefreshView>,
                viewport: Box<dyn #viewport_callback>,
                pending: PendingTriggers,
                triggers: Mutex<HashMap<Edge, Arc<dyn #trigger_callback>>>,
            }

            #[::uniffi::export]
            impl #refresh_view_name {
                /// Create a refresh view for a scroll view of the given visible size
                #[uniffi::constructor]
                pub fn new(width: f64, height: f64, viewport: Box<dyn #viewport_callback>) -> Arc<Self> {
                    Arc::new(Self {
                        inner: Mutex::new(RefreshView::new(Viewport::new(Size::new(width, height)))),
                        viewport,
                        pending: PendingTriggers::new(),
                        triggers: Mutex::new(HashMap::new()),
                    })
                }

                #[uniffi::method]
                pub fn set_indicator(&self, edge: String, indicator: Box<dyn #indicator_callback>) {
                    let Ok(edge) = ::refresh_kit::parse_edge(&edge) else { return };
                    self.with_view(|view| view.set_indicator(edge, Box::new(IndicatorBridge(indicator))));
                }

                #[uniffi::method]
                pub fn remove_indicator(&self, edge: String) {
                    let Ok(edge) = ::refresh_kit::parse_edge(&edge) else { return };
                    self.with_view(|view| {
                        view.remove_indicator(edge);
                    });
                }

                #[uniffi::method]
                pub fn set_trigger_callback(&self, edge: String, callback: Box<dyn #trigger_callback>) {
                    let Ok(edge) = ::refresh_kit::parse_edge(&edge) else { return };
                    let callback: Arc<dyn #trigger_callback> = Arc::from(callback);
                    self.triggers
                        .lock()
                        .unwrap_or_else(|poisoned| poisoned.into_inner())
                        .insert(edge, callback);
                    let recorder = self.pending.recorder(edge);
                    self.with_view(|view| view.set_trigger_callback(edge, recorder));
                }

                #[uniffi::method]
                pub fn end_refreshing(&self, edge: String) {
                    let Ok(edge) = ::refresh_kit::parse_edge(&edge) else { return };
                    self.with_view(|view| view.end_refreshing(edge));
                }

                #[uniffi::method]
                pub fn disable_pagination(&self) {
                    self.with_view(|view| view.disable_pagination());
                }

                #[uniffi::method]
                pub fn reload_pagination(&self) {
                    self.with_view(|view| view.reload_pagination());
                }

                #[uniffi::method]
                pub fn set_static_inset(&self, edge: String, value: f64) {
                    let Ok(edge) = ::refresh_kit::parse_edge(&edge) else { return };
                    self.with_view(|view| view.set_static_inset(edge, value));
                }

                #[uniffi::method]
                pub fn is_refreshing(&self, edge: String) -> bool {
                    let Ok(edge) = ::refresh_kit::parse_edge(&edge) else { return false };
                    self.with_view(|view| view.is_refreshing(edge))
                }

                /// Get the current trigger state of an edge
                #[uniffi::method]
                pub fn state(&self, edge: String) -> String {
                    use ::refresh_kit::ankurah_signals::Get;
                    let Ok(edge) = ::refresh_kit::parse_edge(&edge) else { return String::new() };
                    self.with_view(|view| format!("{:?}", view.state(edge).get()))
                }

                #[uniffi::method]
                pub fn set_content_offset(&self, x: f64, y: f64) {
                    self.with_view(|view| view.set_content_offset(Point::new(x, y)));
                }

                #[uniffi::method]
                pub fn set_content_inset(&self, top: f64, left: f64, bottom: f64, right: f64) {
                    self.with_view(|view| view.set_content_inset(EdgeInsets::new(top, left, bottom, right)));
                }

                #[uniffi::method]
                pub fn set_content_size(&self, width: f64, height: f64) {
                    self.with_view(|view| view.set_content_size(Size::new(width, height)));
                }

                #[uniffi::method]
                pub fn set_bounds(&self, width: f64, height: f64) {
                    self.with_view(|view| view.set_bounds(Size::new(width, height)));
                }

                #[uniffi::method]
                pub fn set_safe_area_insets(&self, top: f64, left: f64, bottom: f64, right: f64) {
                    self.with_view(|view| view.set_safe_area_insets(EdgeInsets::new(top, left, bottom, right)));
                }

                /// The app returned to the foreground
                #[uniffi::method]
                pub fn resume(&self) {
                    self.with_view(|view| view.resume());
                }
            }

            impl #refresh_view_name {
                /// Run `f` against the view, then forward its host updates and
                /// triggers outside the lock
                fn with_view<R>(&self, f: impl FnOnce(&mut RefreshView) -> R) -> R {
                    let (result, updates) = {
                        let mut view = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
                        let result = f(&mut view);
                        (result, view.take_updates())
                    };
                    for update in updates {
                        match update {
                            HostUpdate::ContentOffset(offset) => self.viewport.set_content_offset(offset.x, offset.y),
                            HostUpdate::ContentInset { inset, animation } => self.viewport.set_content_inset(
                                inset.top,
                                inset.left,
                                inset.bottom,
                                inset.right,
                                animation.map(|duration| duration.as_secs_f64()),
                            ),
                            HostUpdate::AlwaysBounceVertical(enabled) => {
                                self.viewport.set_always_bounce_vertical(enabled)
                            }
                        }
                    }
                    for edge in self.pending.take() {
                        let callback = self
                            .triggers
                            .lock()
                            .unwrap_or_else(|poisoned| poisoned.into_inner())
                            .get(&edge)
                            .cloned();
                        if let Some(callback) = callback {
                            callback.on_trigger();
                        }
                    }
                    result
                }
            }
        }

        #[cfg(feature = "uniffi")]
        pub use __uniffi_refresh_view::*;
    }
}
