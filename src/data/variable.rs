//! Variables and domains.

use crate::error::{Result, SieveError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of values a variable holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VarKind {
    /// Finite, ordered set of category labels.
    Categorical {
        /// Category labels, in code order.
        values: Vec<String>,
    },
    /// Real-valued; must be discretized before tabulation.
    Continuous,
}

/// A named variable.
///
/// # Examples
///
/// ```
/// use sieve::data::Variable;
///
/// let sex = Variable::categorical("sex", ["male", "female"]);
/// assert_eq!(sex.index_of("female"), Some(1));
/// assert!(!Variable::continuous("age").is_categorical());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variable {
    name: String,
    kind: VarKind,
}

impl Variable {
    /// Creates a categorical variable.
    pub fn categorical<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            kind: VarKind::Categorical {
                values: values.into_iter().map(Into::into).collect(),
            },
        }
    }

    /// Creates a continuous variable.
    pub fn continuous(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: VarKind::Continuous,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> &VarKind {
        &self.kind
    }

    #[must_use]
    pub fn is_categorical(&self) -> bool {
        matches!(self.kind, VarKind::Categorical { .. })
    }

    /// Category labels; empty for continuous variables.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match &self.kind {
            VarKind::Categorical { values } => values,
            VarKind::Continuous => &[],
        }
    }

    /// Number of categories; zero for continuous variables.
    #[must_use]
    pub fn n_values(&self) -> usize {
        self.values().len()
    }

    /// Code of a category label.
    #[must_use]
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.values().iter().position(|v| v == label)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Role a variable plays in its domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Class,
    Attribute,
    Meta,
}

/// Reference to a variable by name or by position in domain order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VarRef {
    Name(String),
    Index(usize),
}

impl From<&str> for VarRef {
    fn from(name: &str) -> Self {
        VarRef::Name(name.to_string())
    }
}

impl From<String> for VarRef {
    fn from(name: String) -> Self {
        VarRef::Name(name)
    }
}

impl From<&String> for VarRef {
    fn from(name: &String) -> Self {
        VarRef::Name(name.clone())
    }
}

impl From<usize> for VarRef {
    fn from(index: usize) -> Self {
        VarRef::Index(index)
    }
}

impl From<&Variable> for VarRef {
    fn from(var: &Variable) -> Self {
        VarRef::Name(var.name.clone())
    }
}

impl fmt::Display for VarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VarRef::Name(name) => f.write_str(name),
            VarRef::Index(i) => write!(f, "#{i}"),
        }
    }
}

/// Variables of a dataset grouped by role.
///
/// Domain order, used for indices and column storage, is: class variable
/// first, then attributes, then metas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    attributes: Vec<Variable>,
    class_var: Option<Variable>,
    metas: Vec<Variable>,
}

impl Domain {
    /// Creates a domain.
    ///
    /// # Errors
    ///
    /// Returns an error if two variables share a name or a name is empty.
    pub fn new(
        attributes: Vec<Variable>,
        class_var: Option<Variable>,
        metas: Vec<Variable>,
    ) -> Result<Self> {
        let domain = Self {
            attributes,
            class_var,
            metas,
        };

        let mut names: Vec<&str> = domain.variables().map(Variable::name).collect();
        if names.iter().any(|n| n.is_empty()) {
            return Err("Variable names cannot be empty".into());
        }
        names.sort_unstable();
        if let Some(dup) = names.windows(2).find(|w| w[0] == w[1]) {
            return Err(format!("Duplicate variable name: {}", dup[0]).into());
        }

        Ok(domain)
    }

    /// Creates a domain of attributes only.
    ///
    /// # Errors
    ///
    /// Returns an error if two variables share a name.
    pub fn from_attributes(attributes: Vec<Variable>) -> Result<Self> {
        Self::new(attributes, None, Vec::new())
    }

    #[must_use]
    pub fn attributes(&self) -> &[Variable] {
        &self.attributes
    }

    #[must_use]
    pub fn class_var(&self) -> Option<&Variable> {
        self.class_var.as_ref()
    }

    #[must_use]
    pub fn metas(&self) -> &[Variable] {
        &self.metas
    }

    /// All variables in domain order.
    pub fn variables(&self) -> impl Iterator<Item = &Variable> {
        self.class_var
            .iter()
            .chain(self.attributes.iter())
            .chain(self.metas.iter())
    }

    /// Number of variables across all roles.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.class_var.is_some()) + self.attributes.len() + self.metas.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Variable at a domain-order index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Variable> {
        self.variables().nth(index)
    }

    /// Domain-order index of a variable name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.variables().position(|v| v.name() == name)
    }

    /// Resolves a reference to a domain-order index.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::UnknownVariable`] if the reference does not resolve.
    pub fn resolve(&self, var: &VarRef) -> Result<usize> {
        match var {
            VarRef::Name(name) => self
                .index_of(name)
                .ok_or_else(|| SieveError::unknown_variable(name.as_str())),
            VarRef::Index(i) if *i < self.len() => Ok(*i),
            VarRef::Index(_) => Err(SieveError::unknown_variable(var.to_string())),
        }
    }

    /// Role of the variable at a domain-order index.
    #[must_use]
    pub fn role(&self, index: usize) -> Option<Role> {
        let n_class = usize::from(self.class_var.is_some());
        if index < n_class {
            Some(Role::Class)
        } else if index < n_class + self.attributes.len() {
            Some(Role::Attribute)
        } else if index < self.len() {
            Some(Role::Meta)
        } else {
            None
        }
    }

    /// Rebuilds the domain with every variable transformed, keeping roles.
    ///
    /// # Errors
    ///
    /// Returns an error if the transformed names collide.
    pub fn map_variables(&self, mut f: impl FnMut(&Variable) -> Variable) -> Result<Self> {
        let class_var = self.class_var.as_ref().map(&mut f);
        let attributes = self.attributes.iter().map(&mut f).collect();
        let metas = self.metas.iter().map(&mut f).collect();
        Self::new(attributes, class_var, metas)
    }

    /// Keeps the variables at the given domain-order indices, with their roles.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is out of range or repeated.
    pub fn select(&self, indices: &[usize]) -> Result<Self> {
        let mut class_var = None;
        let mut attributes = Vec::new();
        let mut metas = Vec::new();
        for &i in indices {
            let var = self
                .get(i)
                .cloned()
                .ok_or_else(|| SieveError::unknown_variable(VarRef::Index(i).to_string()))?;
            match self.role(i) {
                Some(Role::Class) => class_var = Some(var),
                Some(Role::Attribute) => attributes.push(var),
                Some(Role::Meta) | None => metas.push(var),
            }
        }
        Self::new(attributes, class_var, metas)
    }
}
