//! Macro for generating host bindings around a `RefreshView`
//!
//! This crate provides the `generate_refresh_bindings!` macro which generates
//! platform-specific refresh view types for use with UniFFI and WASM.
//!
//! # Usage
//!
//! Apply in your **bindings crate**, which owns the `uniffi` / `wasm` features
//! and the `uniffi` / `wasm-bindgen` dependencies:
//!
//! ```ignore
//! use refresh_kit::generate_refresh_bindings;
//!
//! // Generates FeedRefreshView plus its callback interfaces
//! generate_refresh_bindings!(Feed);
//! ```
//!
//! With the `uniffi` feature enabled this generates `FeedRefreshView` as a
//! `#[uniffi::Object]`, with `FeedIndicatorCallback`, `FeedTriggerCallback`
//! and `FeedViewportCallback` callback interfaces implemented natively by the
//! host. With the `wasm` feature it generates a `#[wasm_bindgen]`
//! `FeedRefreshView` driven by plain JavaScript objects and functions.

mod uniffi;
mod wasm;

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Ident, Token,
};

/// Configuration parsed from generate_refresh_bindings! macro arguments
struct BindingsConfig {
    prefix: Ident,
}

impl Parse for BindingsConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        // Parse: Prefix[,]
        let prefix: Ident = input.parse()?;
        if input.peek(Token![,]) {
            input.parse::<Token![,]>()?;
        }
        if !input.is_empty() {
            return Err(input.error("expected a single type name prefix, e.g. `Feed`"));
        }
        Ok(Self { prefix })
    }
}

/// Generate typed host bindings for a refresh view
///
/// # Arguments
///
/// - Name prefix for the generated types (e.g., `Feed`)
///
/// # Generated Types
///
/// For a prefix `Feed`, this generates:
/// - `FeedRefreshView` - Platform-specific wrapper owning a `refresh_kit::RefreshView`
/// - `FeedIndicatorCallback`, `FeedTriggerCallback`, `FeedViewportCallback` (UniFFI only)
///
/// # Features
///
/// - With `uniffi` feature: generates UniFFI-compatible refresh view
/// - With `wasm` feature: generates WASM-compatible refresh view
#[proc_macro]
pub fn generate_refresh_bindings(input: TokenStream) -> TokenStream {
    let config = parse_macro_input!(input as BindingsConfig);

    let refresh_view_name = format_ident!("{}RefreshView", config.prefix);

    let uniffi_impl = uniffi::generate(&config.prefix, &refresh_view_name);
    let wasm_impl = wasm::generate(&refresh_view_name);

    let expanded = quote! {
        #uniffi_impl
        #wasm_impl
    };

    expanded.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefix() {
        let config: BindingsConfig = syn::parse_str("Feed").unwrap();
        assert_eq!(config.prefix.to_string(), "Feed");

        let config: BindingsConfig = syn::parse_str("Inbox,").unwrap();
        assert_eq!(config.prefix.to_string(), "Inbox");

        assert!(syn::parse_str::<BindingsConfig>("Feed, Extra").is_err());
        assert!(syn::parse_str::<BindingsConfig>("").is_err());
    }

    #[test]
    fn test_uniffi_names_follow_prefix() {
        let prefix = format_ident!("Feed");
        let name = format_ident!("FeedRefreshView");
        let tokens = uniffi::generate(&prefix, &name).to_string();

        for expected in ["FeedRefreshView", "FeedIndicatorCallback", "FeedTriggerCallback", "FeedViewportCallback"] {
            assert!(tokens.contains(expected), "missing {}", expected);
        }
        assert!(tokens.contains("feature = \"uniffi\""));
    }

    /// Body of the generated `set_trigger_callback`, up to the next method
    fn trigger_setter(tokens: &str) -> &str {
        let start = tokens.find("fn set_trigger_callback").unwrap();
        let end = start + tokens[start..].find("fn end_refreshing").unwrap();
        &tokens[start..end]
    }

    #[test]
    fn test_uniffi_triggers_run_after_unlock() {
        let prefix = format_ident!("Feed");
        let name = format_ident!("FeedRefreshView");
        let tokens = uniffi::generate(&prefix, &name).to_string();

        // The view only records the edge; the host callback is replayed by with_view
        let setter = trigger_setter(&tokens);
        assert!(setter.contains("recorder"));
        assert!(!setter.contains("on_trigger"));
        assert!(tokens.contains("PendingTriggers"));

        let with_view = &tokens[tokens.find("fn with_view").unwrap()..];
        let unlocked = with_view.find("take_updates").unwrap();
        let replayed = with_view.find("on_trigger").unwrap();
        assert!(unlocked < replayed);
    }

    #[test]
    fn test_wasm_triggers_run_after_borrow() {
        let name = format_ident!("FeedRefreshView");
        let tokens = wasm::generate(&name).to_string();

        let setter = trigger_setter(&tokens);
        assert!(setter.contains("recorder"));
        assert!(!setter.contains("call0"));

        let with_view = &tokens[tokens.find("fn with_view").unwrap()..];
        let released = with_view.find("take_updates").unwrap();
        let replayed = with_view.find("call0").unwrap();
        assert!(released < replayed);
    }

    #[test]
    fn test_wasm_methods_use_camel_case() {
        let name = format_ident!("FeedRefreshView");
        let tokens = wasm::generate(&name).to_string();

        assert!(tokens.contains("FeedRefreshView"));
        assert!(tokens.contains("feature = \"wasm\""));
        for js_name in ["setIndicator", "setTriggerCallback", "endRefreshing", "setContentOffset"] {
            assert!(tokens.contains(js_name), "missing {}", js_name);
        }
    }
}
