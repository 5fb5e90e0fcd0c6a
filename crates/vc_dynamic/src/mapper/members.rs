use crate::handle::{MemberInfo, StructShape};

/// Chooses the struct members that take part in mapping.
///
/// The provider is consulted in both directions: excluded members are not
/// written to dynamic objects, and properties naming them are ignored when
/// reading.
pub trait MemberProvider: Send + Sync {
    fn include(&self, shape: &StructShape, member: &MemberInfo) -> bool;
}

/// Maps every member.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AllMembers;

impl MemberProvider for AllMembers {
    #[inline]
    fn include(&self, _shape: &StructShape, _member: &MemberInfo) -> bool {
        true
    }
}

/// Maps only `#[reflect(data_member)]` fields of
/// `#[reflect(data_contract)]` types, and every member of other types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DataContractMembers;

impl MemberProvider for DataContractMembers {
    #[inline]
    fn include(&self, shape: &StructShape, member: &MemberInfo) -> bool {
        !shape.is_data_contract() || member.is_data_member()
    }
}

impl<F> MemberProvider for F
where
    F: Fn(&StructShape, &MemberInfo) -> bool + Send + Sync,
{
    #[inline]
    fn include(&self, shape: &StructShape, member: &MemberInfo) -> bool {
        self(shape, member)
    }
}
