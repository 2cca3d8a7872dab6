use proc_macro2::TokenStream;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::{Expr, Ident, ItemStruct, LitBool, LitStr};

const SIDES: [&str; 3] = ["Common", "Client", "Server"];

/// Arguments accepted by `#[feature_definition(...)]`.
#[derive(Default)]
pub struct FeatureArgs {
    side: Option<Ident>,
    priority: Option<Expr>,
    can_be_disabled: Option<LitBool>,
    enabled_by_default: Option<LitBool>,
    description: Option<LitStr>,
}

impl FeatureArgs {
    pub fn parse(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        if meta.path.is_ident("side") {
            let side: Ident = meta.value()?.parse()?;
            if !SIDES.iter().any(|s| side == s) {
                return Err(syn::Error::new_spanned(
                    &side,
                    "side must be one of `Common`, `Client` or `Server`",
                ));
            }
            self.side = Some(side);
        } else if meta.path.is_ident("priority") {
            self.priority = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("can_be_disabled") {
            self.can_be_disabled = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("enabled_by_default") {
            self.enabled_by_default = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("description") {
            self.description = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("unsupported feature_definition argument"));
        }
        Ok(())
    }
}

pub fn expand_feature(args: FeatureArgs, input: ItemStruct) -> TokenStream {
    let Some(side) = args.side else {
        return syn::Error::new_spanned(&input.ident, "feature_definition requires `side = ...`")
            .to_compile_error();
    };

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let priority = args.priority.map_or_else(|| quote! { 0 }, |p| quote! { #p });
    let can_be_disabled = args.can_be_disabled.map_or(true, |b| b.value);
    let enabled_by_default = args.enabled_by_default.map_or(true, |b| b.value);
    let description = args.description.map_or_else(|| quote! { "" }, |d| quote! { #d });

    quote! {
        #input

        #[automatically_derived]
        impl #impl_generics ::modkit_kernel::feature::FeatureDefinition for #ident #ty_generics #where_clause {
            const META: ::modkit_kernel::domain::feature::FeatureMeta =
                ::modkit_kernel::domain::feature::FeatureMeta::new(
                    ::modkit_kernel::domain::side::Side::#side,
                )
                .with_priority(#priority)
                .with_can_be_disabled(#can_be_disabled)
                .with_enabled_by_default(#enabled_by_default)
                .with_description(#description);
        }
    }
}
