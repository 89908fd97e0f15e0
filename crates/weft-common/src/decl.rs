//! The normalized declaration model.
//!
//! Covers: TypeDecl, ParentRef, MemberDecl, MemberKind, Modifiers,
//! Visibility, Signature, Param, TypeRef, Body, BodyToken.
//!
//! Declarations are host-surface-neutral: they are read from `*.types.json`
//! compilation units and written back as generated documents. Member bodies
//! are opaque token streams; the engine only ever looks at identifier tokens
//! (for generic substitution) and super-reference tokens (for super-call
//! rewriting). Everything else is carried through untouched.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::symbol::{self, SymbolId};

/// The kind of a type declaration in the host surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
}

/// Member visibility in the host surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Protected,
    #[default]
    Private,
}

/// The modifier set carried by a member declaration.
///
/// Mirrors the host's modifier keywords. `is_override` marks a member as
/// overriding a same-named ancestor member; the flattener strips it (and
/// `is_virtual`) because the flattened target has no live dispatch.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub visibility: Visibility,
    pub is_abstract: bool,
    pub is_virtual: bool,
    pub is_override: bool,
    pub is_read_only: bool,
}

impl Modifiers {
    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }
}

/// A type reference as it appears in signatures and member types.
///
/// Either a bare name (`Int`, `X`) or a named application (`List<X>`).
/// Substitution rewrites the names; arities are never checked. This is a
/// syntactic rename, not instantiation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Name(String),
    Apply { name: String, args: Vec<TypeRef> },
}

impl TypeRef {
    pub fn name(n: impl Into<String>) -> Self {
        TypeRef::Name(n.into())
    }

    pub fn apply(n: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Apply { name: n.into(), args }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Name(n) => write!(f, "{n}"),
            TypeRef::Apply { name, args } => {
                write!(f, "{name}<")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{a}")?;
                }
                write!(f, ">")
            }
        }
    }
}

/// A single parameter in a method signature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
}

/// A method signature: parameters plus optional return type.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub return_type: Option<TypeRef>,
}

/// One token of an opaque member body.
///
/// Only `Ident` tokens are subject to generic substitution and only
/// `SuperRef` tokens are subject to super-call rewriting; `Text` carries
/// literals, punctuation, and anything else the engine must not touch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyToken {
    /// An identifier occurrence, e.g. a local, a call target, a type name.
    Ident(String),
    /// An explicit "invoke my ancestor's implementation" reference:
    /// `base.<name>` in the host surface.
    SuperRef(String),
    /// Opaque source text (string literals, operators, keywords, ...).
    Text(String),
}

/// An opaque member body: an ordered token stream.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Body(pub Vec<BodyToken>);

impl Body {
    /// All super references occurring in this body, in order.
    pub fn super_refs(&self) -> impl Iterator<Item = &str> {
        self.0.iter().filter_map(|t| match t {
            BodyToken::SuperRef(name) => Some(name.as_str()),
            _ => None,
        })
    }
}

/// Kind-specific payload of a member declaration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MemberKind {
    Field {
        ty: TypeRef,
        #[serde(default)]
        initializer: Option<Body>,
    },
    Property {
        ty: TypeRef,
        #[serde(default)]
        get: bool,
        #[serde(default)]
        set: bool,
        #[serde(default)]
        initializer: Option<Body>,
        #[serde(default)]
        body: Option<Body>,
    },
    Method {
        #[serde(default)]
        signature: Signature,
        #[serde(default)]
        body: Option<Body>,
    },
}

/// A normalized member declaration, independent of host surface syntax.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDecl {
    pub name: String,
    #[serde(default)]
    pub modifiers: Modifiers,
    #[serde(flatten)]
    pub kind: MemberKind,
}

impl MemberDecl {
    /// The member's body, if any (field initializers are not bodies).
    pub fn body(&self) -> Option<&Body> {
        match &self.kind {
            MemberKind::Field { .. } => None,
            MemberKind::Property { body, .. } => body.as_ref(),
            MemberKind::Method { body, .. } => body.as_ref(),
        }
    }

    pub fn is_method(&self) -> bool {
        matches!(self.kind, MemberKind::Method { .. })
    }

    pub fn is_field(&self) -> bool {
        matches!(self.kind, MemberKind::Field { .. })
    }
}

/// A reference to a declared parent (base class or interface), in source
/// order, with the generic argument names supplied at the reference site.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub name: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub type_args: Vec<String>,
}

impl ParentRef {
    pub fn id(&self) -> SymbolId {
        SymbolId::new(self.scope.clone(), self.name.clone())
    }
}

/// A type declaration in a compilation unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDecl {
    #[serde(default)]
    pub kind: TypeKind,
    pub name: String,
    #[serde(default)]
    pub scope: String,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_partial: bool,
    #[serde(default)]
    pub type_params: Vec<String>,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
    #[serde(default)]
    pub members: Vec<MemberDecl>,
}

impl TypeDecl {
    pub fn id(&self) -> SymbolId {
        SymbolId::new(self.scope.clone(), self.name.clone())
    }

    /// Whether this declaration is a trait: an abstract class whose name
    /// carries the trait suffix.
    pub fn is_trait(&self) -> bool {
        self.kind == TypeKind::Class && self.is_abstract && symbol::is_trait_name(&self.name)
    }

    /// Whether this declaration can compose traits: a concrete class with
    /// at least one declared parent. Whether any parent actually resolves
    /// to a trait is the graph's concern.
    pub fn is_composing_candidate(&self) -> bool {
        self.kind == TypeKind::Class && !self.is_abstract && !self.parents.is_empty()
    }
}
