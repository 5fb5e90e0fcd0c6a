use proc_macro2::Span;
use syn::{Attribute, LitStr, meta::ParseNestedMeta};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Type attributes

/// Attributes placed on the type, `#[reflect(...)]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `default`: build values with `Default::default` and assign members.
    pub default: Option<Span>,
    /// `anonymous`: values are matched by member names.
    pub anonymous: Option<Span>,
    /// `data_contract`: only `data_member` fields take part in contract mapping.
    pub data_contract: Option<Span>,
    /// `open`: values may carry members the type does not declare.
    pub open: Option<Span>,
    /// `auto_register`: add the type to the global registry.
    pub auto_register: Option<Span>,
    /// `type_path = "my_crate::Name"`: overrides `module_path!()` and the ident.
    pub type_path: Option<LitStr>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| result.parse_meta(meta))?;
            }
        }
        Ok(result)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.get_ident().map(|ident| ident.span());
        let flag = if meta.path.is_ident("default") {
            &mut self.default
        } else if meta.path.is_ident("anonymous") {
            &mut self.anonymous
        } else if meta.path.is_ident("data_contract") {
            &mut self.data_contract
        } else if meta.path.is_ident("open") {
            &mut self.open
        } else if meta.path.is_ident("auto_register") {
            &mut self.auto_register
        } else if meta.path.is_ident("type_path") {
            if self.type_path.is_some() {
                return Err(meta.error("`type_path` is set twice"));
            }
            let lit: LitStr = meta.value()?.parse()?;
            if lit.value().trim().is_empty() {
                return Err(syn::Error::new(lit.span(), "`type_path` must not be empty"));
            }
            self.type_path = Some(lit);
            return Ok(());
        } else {
            return Err(meta.error(
                "unknown type attribute, expected one of `default`, `anonymous`, \
                 `data_contract`, `open`, `auto_register` and `type_path`",
            ));
        };
        if flag.is_some() {
            return Err(meta.error("attribute is set twice"));
        }
        *flag = span;
        Ok(())
    }

    /// Splits `type_path` into namespace and name.
    pub fn custom_path(&self) -> Option<(Option<String>, String)> {
        let path = self.type_path.as_ref()?.value();
        let path = path.trim().trim_start_matches("::");
        Some(match path.rsplit_once("::") {
            Some((namespace, name)) => (Some(namespace.to_owned()), name.to_owned()),
            None => (None, path.to_owned()),
        })
    }
}

// -----------------------------------------------------------------------------
// Field attributes

/// Attributes placed on a field, `#[reflect(...)]`.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// `data_member`: part of the data contract.
    pub data_member: Option<Span>,
    /// `skip`: not a member; built with `Default::default`.
    pub skip: Option<Span>,
    /// `rename = "Name"`: the member name on the wire.
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();
        for attr in attrs {
            if attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| result.parse_meta(meta))?;
            }
        }
        if result.skip.is_some() && (result.data_member.is_some() || result.rename.is_some()) {
            return Err(syn::Error::new(
                result.skip.unwrap_or_else(Span::call_site),
                "a skipped field cannot be a `data_member` or be renamed",
            ));
        }
        Ok(result)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        let span = meta.path.get_ident().map(|ident| ident.span());
        if meta.path.is_ident("data_member") {
            if self.data_member.is_some() {
                return Err(meta.error("`data_member` is set twice"));
            }
            self.data_member = span;
        } else if meta.path.is_ident("skip") {
            if self.skip.is_some() {
                return Err(meta.error("`skip` is set twice"));
            }
            self.skip = span;
        } else if meta.path.is_ident("rename") {
            if self.rename.is_some() {
                return Err(meta.error("`rename` is set twice"));
            }
            self.rename = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error(
                "unknown field attribute, expected one of `data_member`, `skip` and `rename`",
            ));
        }
        Ok(())
    }
}
