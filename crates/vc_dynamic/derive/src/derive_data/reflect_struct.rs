use syn::{Field, Fields, Ident, Type, spanned::Spanned};

use super::{FieldAttributes, ReflectMeta};

pub(crate) struct ReflectStruct<'a> {
    pub meta: ReflectMeta<'a>,
    pub fields: Vec<StructField<'a>>,
}

/// A named field and its attributes.
pub(crate) struct StructField<'a> {
    pub data: &'a Field,
    pub attrs: FieldAttributes,
}

impl<'a> StructField<'a> {
    #[inline]
    pub fn ident(&self) -> &'a Ident {
        // Only named fields are collected.
        self.data.ident.as_ref().unwrap_or_else(|| unreachable!())
    }

    #[inline]
    pub fn ty(&self) -> &'a Type {
        &self.data.ty
    }

    /// The member name on the wire.
    pub fn member_name(&self) -> String {
        match &self.attrs.rename {
            Some(lit) => lit.value(),
            None => self.ident().to_string(),
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.attrs.skip.is_none()
    }
}

impl<'a> ReflectStruct<'a> {
    pub fn new(meta: ReflectMeta<'a>, fields: &'a Fields) -> syn::Result<Self> {
        let Fields::Named(named) = fields else {
            return Err(syn::Error::new(
                fields.span(),
                "`Reflect` can only be derived for structs with named fields",
            ));
        };
        let fields = named
            .named
            .iter()
            .map(|data| {
                Ok(StructField {
                    data,
                    attrs: FieldAttributes::parse_attrs(&data.attrs)?,
                })
            })
            .collect::<syn::Result<Vec<_>>>()?;

        let mut names: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields.iter().filter(|field| field.is_active()) {
            let name = field.member_name();
            if names.contains(&name) {
                return Err(syn::Error::new(
                    field.data.span(),
                    format!("member name `{name}` is used twice"),
                ));
            }
            names.push(name);
        }

        Ok(Self { meta, fields })
    }

    #[inline]
    pub fn meta(&self) -> &ReflectMeta<'a> {
        &self.meta
    }

    /// Fields that are members of the reflected struct.
    pub fn active_fields(&self) -> impl Iterator<Item = &StructField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }
}
