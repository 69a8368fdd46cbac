//! # odm_query Derive Macros
//!
//! ### `Mapped`
//!
//! Derives `odm_query::registry::Mapped` for a struct, registering its named
//! fields in declaration order so they can be resolved with `key!`.
//!
//! - **Supported for**: Structs with named fields and no generic parameters
//! - **Field attribute**: `#[field(name = "...")]` registers the field under another name
//! - **Field attribute**: `#[field(skip)]` leaves the field out of the registry
//!
//! # Examples
//!
//! ```rust,ignore
//! use odm_query::key;
//! use odm_query_derive::Mapped;
//!
//! #[derive(Mapped)]
//! pub struct Bar {
//!     pub w: i64,
//!     #[field(name = "label")]
//!     pub z: String,
//!     #[field(skip)]
//!     pub cache: Vec<u8>,
//! }
//!
//! let label = key!(Bar::z)?;
//! assert_eq!(label.name(), "label");
//! assert!(key!(Bar::cache).is_err());
//! ```

extern crate proc_macro;
mod mapped;

use crate::mapped::generate_mapped_for_struct;
use proc_macro::TokenStream;
use syn::{Data, DeriveInput};

/// Derives the `Mapped` trait for a struct with named fields.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to an enum or union
/// - Used on tuple structs, unit structs or generic structs
/// - Two fields are registered under the same name
#[proc_macro_derive(Mapped, attributes(field))]
pub fn derive_mapped(input: TokenStream) -> TokenStream {
    let ast = syn::parse_macro_input!(input as DeriveInput);

    match ast.data {
        Data::Struct(ref data) => match generate_mapped_for_struct(&ast, data) {
            Ok(token_stream) => token_stream,
            Err(e) => e.to_compile_error().into(),
        },
        Data::Enum(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Mapped for enums. Only structs with named fields are supported.",
            );
            error.to_compile_error().into()
        }
        Data::Union(_) => {
            let error = syn::Error::new_spanned(
                &ast,
                "Cannot derive Mapped for unions. Only structs with named fields are supported.",
            );
            error.to_compile_error().into()
        }
    }
}
