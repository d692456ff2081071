//! Procedural macros for `envflags`.
//!
//! `#[derive(EnvFlags)]` walks the named fields of a struct at compile time
//! and emits an `envflags::EnvFlags` impl that registers every eligible field
//! into a `FlagSet`. A field is eligible when it is declared `pub` (in any
//! form) and its type is one of the supported scalars. Everything else is
//! left out of the generated binding table.

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{
    Attribute, Data, DeriveInput, Expr, Field, Fields, Lit, LitStr, Meta, PathArguments, Type,
    Visibility, parse_macro_input,
};

/// Type names the binder knows how to parse into. Matched on the last path
/// segment, so `chrono::TimeDelta` and `TimeDelta` both qualify. The
/// duration names must be bare or `chrono::`-qualified.
const SUPPORTED_TYPES: &[&str] = &[
    "bool",
    "TimeDelta",
    "Duration",
    "f64",
    "isize",
    "i64",
    "String",
    "usize",
    "u64",
];

/// Derive macro for `envflags::EnvFlags`.
///
/// Recognised field attributes:
///
/// - `#[flag(name = "PORT")]` sets the external name (defaults to the field
///   identifier).
/// - `#[flag(default = "8080")]` sets the default literal.
/// - `#[flag(skip)]` keeps a public field out of the binding table.
#[proc_macro_derive(EnvFlags, attributes(flag))]
pub fn derive_env_flags(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct FieldFlag {
    name: String,
    default: String,
    help: String,
    member: syn::Ident,
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    data.struct_token,
                    "EnvFlags requires a struct with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                ident,
                "EnvFlags can only be derived for structs",
            ));
        }
    };

    let mut flags = Vec::new();
    let mut errors: Option<syn::Error> = None;
    for field in fields {
        match field_flag(field) {
            Ok(Some(flag)) => flags.push(flag),
            Ok(None) => {}
            Err(err) => match errors.as_mut() {
                Some(existing) => existing.combine(err),
                None => errors = Some(err),
            },
        }
    }
    if let Some(err) = errors {
        return Err(err);
    }

    let registrations = flags.iter().map(|flag| {
        let FieldFlag {
            name,
            default,
            help,
            member,
        } = flag;
        quote! {
            __set.field_with_help(#name, #default, #help, &mut self.#member);
        }
    });

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envflags::EnvFlags for #ident #ty_generics #where_clause {
            #[allow(unused_variables)]
            fn bind_fields<'__envflags>(
                &'__envflags mut self,
                __set: &mut ::envflags::FlagSet<'__envflags>,
            ) {
                #( #registrations )*
            }
        }
    })
}

/// Build the registration for one field, or `None` when it is not eligible.
fn field_flag(field: &Field) -> syn::Result<Option<FieldFlag>> {
    let Some(member) = field.ident.clone() else {
        return Ok(None);
    };

    let attrs = FlagAttrs::parse(&field.attrs)?;
    if attrs.skip {
        return Ok(None);
    }
    if matches!(field.vis, Visibility::Inherited) || !is_supported(&field.ty) {
        return Ok(None);
    }

    let name = match attrs.name {
        Some(name) if !name.is_empty() => name,
        _ => member.unraw().to_string(),
    };

    Ok(Some(FieldFlag {
        name,
        default: attrs.default.unwrap_or_default(),
        help: doc_text(&field.attrs),
        member,
    }))
}

#[derive(Default)]
struct FlagAttrs {
    name: Option<String>,
    default: Option<String>,
    skip: bool,
}

impl FlagAttrs {
    fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attr in attrs.iter().filter(|a| a.path().is_ident("flag")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.name = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("default") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.default = Some(lit.value());
                    Ok(())
                } else if meta.path.is_ident("skip") {
                    out.skip = true;
                    Ok(())
                } else {
                    Err(meta.error("unsupported flag attribute, expected `name`, `default` or `skip`"))
                }
            })?;
        }
        Ok(out)
    }
}

fn is_supported(ty: &Type) -> bool {
    match ty {
        Type::Group(group) => is_supported(&group.elem),
        Type::Paren(paren) => is_supported(&paren.elem),
        Type::Path(path) if path.qself.is_none() => {
            let segments = &path.path.segments;
            let Some(last) = segments.last() else {
                return false;
            };
            if !matches!(last.arguments, PathArguments::None) {
                return false;
            }
            let name = last.ident.to_string();
            if !SUPPORTED_TYPES.contains(&name.as_str()) {
                return false;
            }
            // `std::time::Duration` shares the name but is not bindable.
            let qualifier = segments.iter().rev().nth(1);
            !matches!(name.as_str(), "Duration" | "TimeDelta")
                || qualifier.is_none_or(|seg| seg.ident == "chrono")
        }
        _ => false,
    }
}

/// Join the `///` lines of a field into a single help sentence.
fn doc_text(attrs: &[Attribute]) -> String {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|a| a.path().is_ident("doc"))
        .filter_map(|a| match &a.meta {
            Meta::NameValue(nv) => match &nv.value {
                Expr::Lit(expr) => match &expr.lit {
                    Lit::Str(s) => Some(s.value().trim().to_string()),
                    _ => None,
                },
                _ => None,
            },
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();
    lines.join(" ")
}
