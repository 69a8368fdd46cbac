use proc_macro::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, LitStr, Result};

struct MappedField<'a> {
    ident: &'a syn::Ident,
    ty: &'a syn::Type,
    name: String,
}

pub(crate) fn generate_mapped_for_struct(
    ast: &DeriveInput,
    data: &DataStruct,
) -> Result<TokenStream> {
    let name = &ast.ident;

    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            format!(
                "Cannot derive Mapped for generic struct '{}'. \
                 Use mapped_fields! on each concrete instantiation instead.",
                name
            ),
        ));
    }

    let named = match &data.fields {
        Fields::Named(named) => named,
        _ => {
            return Err(syn::Error::new_spanned(
                ast,
                format!(
                    "Cannot derive Mapped for '{}': only structs with named fields are supported.\n\
                     Example: #[derive(Mapped)] pub struct Point {{ x: i32, y: i32 }}",
                    name
                ),
            ))
        }
    };

    let mut fields: Vec<MappedField> = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };

        let mut field_name = ident.to_string();
        let mut skip = false;
        for attr in &field.attrs {
            if attr.path().is_ident("field") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("name") {
                        let value = meta.value()?;
                        let s: LitStr = value.parse()?;
                        if s.value().is_empty() {
                            return Err(meta.error("Field name cannot be empty"));
                        }
                        field_name = s.value();
                        Ok(())
                    } else if meta.path.is_ident("skip") {
                        skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("Unknown field attribute, expected `name` or `skip`"))
                    }
                })?;
            }
        }

        if skip {
            continue;
        }

        if fields.iter().any(|f| f.name == field_name) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("Field name '{}' is registered twice on '{}'", field_name, name),
            ));
        }

        fields.push(MappedField {
            ident,
            ty: &field.ty,
            name: field_name,
        });
    }

    let registrations: Vec<proc_macro2::TokenStream> = fields.iter().map(|field| {
        let ident = field.ident;
        let ty = field.ty;
        let field_name = &field.name;
        quote! {
            .field(
                ::odm_query::registry::FieldAccessor::<#name, #ty>::new(
                    ::core::mem::offset_of!(#name, #ident),
                    |owner| &owner.#ident,
                ),
                #field_name,
            )
        }
    }).collect();

    let expanded = quote! {
        impl ::odm_query::registry::Mapped for #name {
            fn registry() -> &'static ::odm_query::registry::FieldRegistry<Self> {
                static REGISTRY: ::std::sync::OnceLock<::odm_query::registry::FieldRegistry<#name>> =
                    ::std::sync::OnceLock::new();
                REGISTRY.get_or_init(|| {
                    ::odm_query::registry::FieldRegistry::<#name>::builder()
                        #(#registrations)*
                        .build()
                })
            }
        }
    };

    Ok(TokenStream::from(expanded))
}
