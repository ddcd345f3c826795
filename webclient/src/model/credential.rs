use std::{collections::HashMap, fmt::Debug};

/// Credential field name.
/// e.g. "email", "password"
pub type CredName = &'static str;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CredFieldKind {
    Text,
    Password,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CredFieldMeta {
    pub name: CredName,
    pub kind: CredFieldKind,
}

/// Credential table.
/// e.g. `[ "email" => "bob@example.com", "password" => "***" ]`
pub type CredMap = HashMap<CredName, String>;

pub(crate) fn take_field(cred: &mut CredMap, name: CredName) -> crate::Result<String> {
    cred.remove(name)
        .ok_or(crate::Error::MissingCredential(name))
}
