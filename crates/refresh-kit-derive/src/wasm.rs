//! WASM wrapper generation for RefreshView
//!
//! Generates `{Prefix}RefreshView` with `#[wasm_bindgen]`
//!
//! The wrapper owns a `RefreshView` and talks to plain JavaScript objects:
//! indicators expose `setFrame`, `setHidden`, `setProgress`, `startRefreshing`,
//! `endRefreshing` and `resume`; the viewport target exposes
//! `setContentOffset`, `setContentInset` and `setAlwaysBounceVertical`.
//! Trigger functions run once the view is released, so they may call straight
//! back into it (for example `endRefreshing` with cached data).

use proc_macro2::TokenStream;
use quote::quote;
use syn::Ident;

pub fn generate(refresh_view_name: &Ident) -> TokenStream {
    quote! {
        #[cfg(feature = "wasm")]
        mod __wasm_refresh_view {
            use super::*;
            use ::wasm_bindgen::prelude::*;
            use ::refresh_kit::derive_deps::js_sys::{Array, Function, Object, Reflect};
            use ::refresh_kit::derive_deps::send_wrapper::SendWrapper;
            use ::refresh_kit::{Edge, EdgeInsets, HostUpdate, PendingTriggers, Point, Rect, RefreshView, Size, Viewport};
            use ::std::cell::RefCell;
            use ::std::collections::HashMap;

            /// Call `target[name](...args)`, ignoring missing methods and thrown errors
            fn call_method(target: &JsValue, name: &str, args: &Array) {
                let Ok(method) = Reflect::get(target, &JsValue::from_str(name)) else {
                    return;
                };
                if let Ok(method) = method.dyn_into::<Function>() {
                    let _ = method.apply(target, args);
                }
            }

            struct JsIndicator {
                target: SendWrapper<JsValue>,
                size: Size,
            }

            impl ::refresh_kit::RefreshIndicator for JsIndicator {
                fn size(&self) -> Size {
                    self.size
                }

                fn set_frame(&mut self, frame: Rect) {
                    let obj = Object::new();
                    let _ = Reflect::set(&obj, &JsValue::from_str("x"), &JsValue::from_f64(frame.origin.x));
                    let _ = Reflect::set(&obj, &JsValue::from_str("y"), &JsValue::from_f64(frame.origin.y));
                    let _ = Reflect::set(&obj, &JsValue::from_str("width"), &JsValue::from_f64(frame.size.width));
                    let _ = Reflect::set(&obj, &JsValue::from_str("height"), &JsValue::from_f64(frame.size.height));
                    call_method(&self.target, "setFrame", &Array::of1(&obj.into()));
                }

                fn set_hidden(&mut self, hidden: bool) {
                    call_method(&self.target, "setHidden", &Array::of1(&JsValue::from_bool(hidden)));
                }

                fn set_progress(&mut self, progress: f64) {
                    call_method(&self.target, "setProgress", &Array::of1(&JsValue::from_f64(progress)));
                }

                fn start_refreshing(&mut self) {
                    call_method(&self.target, "startRefreshing", &Array::new());
                }

                fn end_refreshing(&mut self) {
                    call_method(&self.target, "endRefreshing", &Array::new());
                }

                fn resume(&mut self) {
                    call_method(&self.target, "resume", &Array::new());
                }
            }

            fn edge(name: &str) -> Result<Edge, JsValue> {
                ::refresh_kit::parse_edge(name).map_err(|e| JsValue::from_str(&e))
            }

            /// WASM wrapper for RefreshView
            #[wasm_bindgen]
            pub struct #refresh_view_name {
                inner: RefCell<RefreshView>,
                viewport: JsValue,
                pending: PendingTriggers,
                triggers: RefCell<HashMap<Edge, Function>>,
            }

            #[wasm_bindgen]
            impl #refresh_view_name {
                /// Create a refresh view for a scroll container of the given visible size
                ///
                /// # Arguments
                /// * `width`, `height` - Visible size of the scroll container
                /// * `viewport` - Object receiving writes for the scroll container
                #[wasm_bindgen(constructor)]
                pub fn new(width: f64, height: f64, viewport: JsValue) -> #refresh_view_name {
                    Self {
                        inner: RefCell::new(RefreshView::new(Viewport::new(Size::new(width, height)))),
                        viewport,
                        pending: PendingTriggers::new(),
                        triggers: RefCell::new(HashMap::new()),
                    }
                }

                #[wasm_bindgen(js_name = setIndicator)]
                pub fn set_indicator(&self, edge_name: String, indicator: JsValue, width: f64, height: f64) -> Result<(), JsValue> {
                    let edge = edge(&edge_name)?;
                    let indicator = JsIndicator {
                        target: SendWrapper::new(indicator),
                        size: Size::new(width, height),
                    };
                    self.with_view(|view| view.set_indicator(edge, Box::new(indicator)));
                    Ok(())
                }

                #[wasm_bindgen(js_name = removeIndicator)]
                pub fn remove_indicator(&self, edge_name: String) -> Result<(), JsValue> {
                    let edge = edge(&edge_name)?;
                    self.with_view(|view| {
                        view.remove_indicator(edge);
                    });
                    Ok(())
                }

                /// Set the function called when an edge triggers
                #[wasm_bindgen(js_name = setTriggerCallback)]
                pub fn set_trigger_callback(&self, edge_name: String, callback: Function) -> Result<(), JsValue> {
                    let edge = edge(&edge_name)?;
                    self.triggers.borrow_mut().insert(edge, callback);
                    let recorder = self.pending.recorder(edge);
                    self.with_view(|view| view.set_trigger_callback(edge, recorder));
                    Ok(())
                }

                #[wasm_bindgen(js_name = endRefreshing)]
                pub fn end_refreshing(&self, edge_name: String) -> Result<(), JsValue> {
                    let edge = edge(&edge_name)?;
                    self.with_view(|view| view.end_refreshing(edge));
                    Ok(())
                }

                #[wasm_bindgen(js_name = disablePagination)]
                pub fn disable_pagination(&self) {
                    self.with_view(|view| view.disable_pagination());
                }

                #[wasm_bindgen(js_name = reloadPagination)]
                pub fn reload_pagination(&self) {
                    self.with_view(|view| view.reload_pagination());
                }

                #[wasm_bindgen(js_name = setStaticInset)]
                pub fn set_static_inset(&self, edge_name: String, value: f64) -> Result<(), JsValue> {
                    let edge = edge(&edge_name)?;
                    self.with_view(|view| view.set_static_inset(edge, value));
                    Ok(())
                }

                #[wasm_bindgen(js_name = isRefreshing)]
                pub fn is_refreshing(&self, edge_name: String) -> Result<bool, JsValue> {
                    let edge = edge(&edge_name)?;
                    Ok(self.inner.borrow().is_refreshing(edge))
                }

                /// Get the current trigger state of an edge ("Idle", "Pulling" or "Refreshing")
                pub fn state(&self, edge_name: String) -> Result<String, JsValue> {
                    use ::refresh_kit::ankurah_signals::Get;
                    let edge = edge(&edge_name)?;
                    Ok(format!("{:?}", self.inner.borrow().state(edge).get()))
                }

                #[wasm_bindgen(js_name = setContentOffset)]
                pub fn set_content_offset(&self, x: f64, y: f64) {
                    self.with_view(|view| view.set_content_offset(Point::new(x, y)));
                }

                #[wasm_bindgen(js_name = setContentInset)]
                pub fn set_content_inset(&self, top: f64, left: f64, bottom: f64, right: f64) {
                    self.with_view(|view| view.set_content_inset(EdgeInsets::new(top, left, bottom, right)));
                }

                #[wasm_bindgen(js_name = setContentSize)]
                pub fn set_content_size(&self, width: f64, height: f64) {
                    self.with_view(|view| view.set_content_size(Size::new(width, height)));
                }

                #[wasm_bindgen(js_name = setBounds)]
                pub fn set_bounds(&self, width: f64, height: f64) {
                    self.with_view(|view| view.set_bounds(Size::new(width, height)));
                }

                #[wasm_bindgen(js_name = setSafeAreaInsets)]
                pub fn set_safe_area_insets(&self, top: f64, left: f64, bottom: f64, right: f64) {
                    self.with_view(|view| view.set_safe_area_insets(EdgeInsets::new(top, left, bottom, right)));
                }

                /// The page became visible again
                pub fn resume(&self) {
                    self.with_view(|view| view.resume());
                }
            }

            impl #refresh_view_name {
                fn with_view<R>(&self, f: impl FnOnce(&mut RefreshView) -> R) -> R {
                    let (result, updates) = {
                        let mut view = self.inner.borrow_mut();
                        let result = f(&mut view);
                        (result, view.take_updates())
                    };
                    for update in updates {
                        match update {
                            HostUpdate::ContentOffset(offset) => call_method(
                                &self.viewport,
                                "setContentOffset",
                                &Array::of2(&JsValue::from_f64(offset.x), &JsValue::from_f64(offset.y)),
                            ),
                            HostUpdate::ContentInset { inset, animation } => {
                                let seconds = animation
                                    .map(|duration| JsValue::from_f64(duration.as_secs_f64()))
                                    .unwrap_or(JsValue::UNDEFINED);
                                call_method(
                                    &self.viewport,
                                    "setContentInset",
                                    &Array::of5(
                                        &JsValue::from_f64(inset.top),
                                        &JsValue::from_f64(inset.left),
                                        &JsValue::from_f64(inset.bottom),
                                        &JsValue::from_f64(inset.right),
                                        &seconds,
                                    ),
                                );
                            }
                            HostUpdate::AlwaysBounceVertical(enabled) => call_method(
                                &self.viewport,
                                "setAlwaysBounceVertical",
                                &Array::of1(&JsValue::from_bool(enabled)),
                            ),
                        }
                    }
                    for edge in self.pending.take() {
                        let callback = self.triggers.borrow().get(&edge).cloned();
                        if let Some(callback) = callback {
                            let _ = callback.call0(&JsValue::NULL);
                        }
                    }
                    result
                }
            }
        }

        #[cfg(feature = "wasm")]
        pub use __wasm_refresh_view::*;
    }
}
