//! Binding generator for the mobile hosts.
//!
//! Build the library first, then point the generator at the compiled artifact:
//!
//! ```bash
//! cargo build --release
//! cargo run --features cli --bin uniffi-bindgen generate \
//!     --library target/release/librecipe_store.so --language kotlin --out-dir ./bindings
//! ```
//!
//! Use `--language swift` for the iOS host.

fn main() {
    uniffi::uniffi_bindgen_main()
}
