use crate::error::CatalogError;
use crate::error::Result;
use crate::taxonomy::Category;
use crate::taxonomy::Ownership;
use crate::taxonomy::PropertyGroup;
use crate::taxonomy::PropertyType;
use serde::Serialize;

/// The current `(ownership, group, type)` choice.
///
/// `property_type` is always one of `group.allowed_types()`; the fields are
/// private so that only the `select_*` methods can move it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategorySelection {
    ownership: Ownership,
    group: PropertyGroup,
    property_type: PropertyType,
}

impl Default for CategorySelection {
    fn default() -> Self {
        let group = PropertyGroup::default();
        Self {
            ownership: Ownership::default(),
            group,
            property_type: group.default_type(),
        }
    }
}

impl CategorySelection {
    /// Builds a selection from a full triple, rejecting a type outside the group.
    pub fn new(
        ownership: Ownership,
        group: PropertyGroup,
        property_type: PropertyType,
    ) -> Result<Self> {
        let mut selection = Self {
            ownership,
            group,
            property_type: group.default_type(),
        };
        selection.select_type(property_type)?;
        Ok(selection)
    }

    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    pub fn group(&self) -> PropertyGroup {
        self.group
    }

    pub fn property_type(&self) -> PropertyType {
        self.property_type
    }

    pub fn category(&self) -> Category {
        Category::new(self.ownership, self.property_type)
    }

    pub fn type_options(&self) -> &'static [PropertyType] {
        self.group.allowed_types()
    }

    /// Returns `true` when the effective category changed.
    pub fn select_ownership(&mut self, ownership: Ownership) -> bool {
        let changed = self.ownership != ownership;
        self.ownership = ownership;
        changed
    }

    /// Switches group, replacing the type with the group's default when the
    /// current one is not offered there. Returns `true` when the effective
    /// category changed.
    pub fn select_group(&mut self, group: PropertyGroup) -> bool {
        let before = self.category();
        self.group = group;
        if !group.allows(self.property_type) {
            self.property_type = group.default_type();
        }
        before != self.category()
    }

    pub fn select_type(&mut self, property_type: PropertyType) -> Result<bool> {
        if !self.group.allows(property_type) {
            return Err(CatalogError::TypeNotInGroup {
                property_type,
                group: self.group,
            });
        }
        let changed = self.property_type != property_type;
        self.property_type = property_type;
        Ok(changed)
    }
}
