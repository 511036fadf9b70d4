use crate::domain::MolType;
use std::borrow::Cow;

/// Node variants of a PGopher document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Mixture,
    Parameter,
    Species,
    Molecule(MolType),
    Manifold(MolType),
    Hamiltonian(MolType),
    TransitionMoments,
    CartesianTransitionMoment,
}

impl NodeKind {
    pub fn tag(self) -> Cow<'static, str> {
        match self {
            Self::Mixture => Cow::Borrowed("Mixture"),
            Self::Parameter => Cow::Borrowed("Parameter"),
            Self::Species => Cow::Borrowed("Species"),
            Self::Molecule(mol_type) => Cow::Owned(mol_type.molecule_tag()),
            Self::Manifold(mol_type) => Cow::Owned(mol_type.manifold_tag()),
            Self::Hamiltonian(mol_type) => Cow::Owned(mol_type.hamiltonian_tag()),
            Self::TransitionMoments => Cow::Borrowed("TransitionMoments"),
            Self::CartesianTransitionMoment => Cow::Borrowed("CartesianTransitionMoment"),
        }
    }
}

/// One element of the document tree. Children are owned, so a node has at
/// most one parent.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    kind: NodeKind,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// `<Parameter Name=".." Value=".."/>`
    pub fn parameter(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(NodeKind::Parameter)
            .with_attribute("Name", name)
            .with_attribute("Value", value)
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self
            .attributes
            .iter_mut()
            .find(|(existing, _)| *existing == name)
        {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn tag(&self) -> Cow<'static, str> {
        self.kind.tag()
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Depth-first, pre-order walk over this element and all descendants.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut found = vec![self];
        for child in &self.children {
            found.extend(child.descendants());
        }
        found
    }
}
