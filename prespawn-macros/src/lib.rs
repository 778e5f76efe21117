//! Procedural macros for `prespawn` events.
//!
//! `#[derive(Event)]` implements `Payload` so a type can travel through the
//! event manager, and `#[cancellable]` adds a `cancelled` flag together with
//! a `Cancellable` implementation.
//!
//! Fields listed in `#[event(fixed(...))]` are put back by the event manager
//! after every blocking handler, so handlers cannot change them even by
//! replacing the whole event.

use proc_macro::TokenStream;
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::{
    Data, DeriveInput, Fields, ItemStruct, parse::Parser, parse_macro_input, spanned::Spanned,
};

/// Path to the `prespawn` crate as seen from the macro call site.
fn crate_path() -> proc_macro2::TokenStream {
    match crate_name("prespawn") {
        // `prespawn` declares `extern crate self as prespawn`, so the absolute
        // path resolves inside the crate, its tests and downstream users alike.
        Ok(FoundCrate::Itself) | Err(_) => quote!(::prespawn),
        Ok(FoundCrate::Name(name)) => {
            let ident = syn::Ident::new(&name, proc_macro2::Span::call_site());
            quote!(::#ident)
        }
    }
}

/// Field names listed in `#[event(fixed(a, b))]`.
fn fixed_fields(input: &DeriveInput) -> syn::Result<Vec<syn::Ident>> {
    let mut fixed = Vec::new();
    for attr in input.attrs.iter().filter(|attr| attr.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("fixed") {
                meta.parse_nested_meta(|field| {
                    fixed.push(field.path.require_ident()?.clone());
                    Ok(())
                })
            } else {
                Err(meta.error("expected `fixed(...)`"))
            }
        })?;
    }
    Ok(fixed)
}

/// Implements `Payload` for a struct.
///
/// The payload name is the bare type name and only shows up in logs; the
/// event manager keys its handler lists by type.
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let krate = crate_path();

    if !matches!(input.data, Data::Struct(_)) {
        return syn::Error::new(input.span(), "Event can only be derived for structs")
            .to_compile_error()
            .into();
    }

    let fixed = match fixed_fields(&input) {
        Ok(fixed) => fixed,
        Err(err) => return err.to_compile_error().into(),
    };
    let restore_fixed = if fixed.is_empty() {
        quote!()
    } else {
        quote! {
            fn restore_fixed(&mut self, before: &dyn #krate::plugin::Payload) {
                if let Some(before) = before.as_any().downcast_ref::<Self>() {
                    #(self.#fixed = ::std::clone::Clone::clone(&before.#fixed);)*
                }
            }
        }
    };

    quote! {
        impl #impl_generics #krate::plugin::Payload for #name #ty_generics #where_clause {
            fn get_name_static() -> &'static str {
                stringify!(#name)
            }

            fn get_name(&self) -> &'static str {
                stringify!(#name)
            }

            fn as_any(&self) -> &dyn ::std::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::std::any::Any {
                self
            }

            #restore_fixed
        }
    }
    .into()
}

/// Adds `pub cancelled: bool` to a struct with named fields and implements
/// `Cancellable` on top of it.
#[proc_macro_attribute]
pub fn cancellable(args: TokenStream, input: TokenStream) -> TokenStream {
    if !args.is_empty() {
        return syn::Error::new(
            proc_macro2::TokenStream::from(args).span(),
            "cancellable takes no arguments",
        )
        .to_compile_error()
        .into();
    }

    let mut item = parse_macro_input!(input as ItemStruct);
    let krate = crate_path();
    let span = item.span();

    let Fields::Named(fields) = &mut item.fields else {
        return syn::Error::new(span, "cancellable requires a struct with named fields")
            .to_compile_error()
            .into();
    };

    let field = match syn::Field::parse_named.parse2(quote! {
        /// Whether the event has been cancelled.
        pub cancelled: bool
    }) {
        Ok(field) => field,
        Err(err) => return err.to_compile_error().into(),
    };
    fields.named.push(field);

    let name = &item.ident;
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();

    quote! {
        #item

        impl #impl_generics #krate::plugin::Cancellable for #name #ty_generics #where_clause {
            fn cancelled(&self) -> bool {
                self.cancelled
            }

            fn set_cancelled(&mut self, cancelled: bool) {
                self.cancelled = cancelled;
            }
        }
    }
    .into()
}
