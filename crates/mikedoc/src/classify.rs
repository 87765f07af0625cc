//! Sorting and classification rules
//!
//! Every ordering decision of the documentation model lives here, so that a
//! build is reproducible: module members are selected and sorted by name, and
//! class members are resolved through the inheritance chain, pre-sorted public
//! names first, then grouped by kind.

use crate::class::ClassMemberDescriptor;
use crate::feed::{
    is_private_name, is_reserved_name, AttributeRecord, ClassAttribute, ModuleRecord, TypeRecord,
    CONSTRUCTOR_NAME,
};
use crate::reflection::Reflection;
use indexmap::map::Entry;
use indexmap::IndexMap;

/// Latest declaration of a class attribute and the types that declared it
#[derive(Debug, Clone)]
pub struct ResolvedAttribute<'r> {
    /// Declaration of the most derived type touching the attribute
    pub symbol: &'r ClassAttribute,
    /// Declaring types, nearest override first
    pub lineage: Vec<&'r TypeRecord>,
}

/// Attributes of a module to document, alphabetically sorted.
///
/// With an export allow-list, exactly the allow-listed names present in the
/// attribute table are kept, whatever their origin. Without one, reserved
/// `__` names and attributes owned by another module are dropped; attributes
/// without a recorded owner are kept.
pub fn select_module_members(module: &ModuleRecord) -> Vec<(&str, &AttributeRecord)> {
    let mut selected: Vec<(&str, &AttributeRecord)> = match &module.exports {
        Some(exports) => module
            .attributes
            .iter()
            .filter(|(name, _)| exports.iter().any(|e| e == *name))
            .map(|(name, attr)| (name.as_str(), attr))
            .collect(),
        None => module
            .attributes
            .iter()
            .filter(|(name, _)| !is_reserved_name(name))
            .filter(|(_, attr)| {
                attr.owner
                    .as_deref()
                    .map_or(true, |owner| owner == module.name)
            })
            .map(|(name, attr)| (name.as_str(), attr))
            .collect(),
    };

    selected.sort_by(|a, b| a.0.cmp(b.0));
    selected
}

/// Whether a class attribute is documented: reserved names are skipped,
/// except the constructor
pub fn is_documented_class_attribute(name: &str) -> bool {
    !is_reserved_name(name) || name == CONSTRUCTOR_NAME
}

/// Fold the directly declared attributes of `order` (base-most first) into
/// one entry per name.
///
/// Attribute identity is the name alone, so same-named attributes coming
/// from unrelated branches share one lineage.
pub fn fold_lineage<'r, R>(
    reflection: &'r R,
    order: &[&'r TypeRecord],
) -> IndexMap<&'r str, ResolvedAttribute<'r>>
where
    R: Reflection + ?Sized,
{
    let mut resolved: IndexMap<&'r str, ResolvedAttribute<'r>> = IndexMap::new();

    for ty in order.iter().copied() {
        for (name, attr) in reflection.direct_attributes(ty) {
            if !is_documented_class_attribute(name) {
                continue;
            }
            match resolved.entry(name.as_str()) {
                Entry::Occupied(mut entry) => {
                    let entry = entry.get_mut();
                    entry.symbol = attr;
                    entry.lineage.insert(0, ty);
                }
                Entry::Vacant(entry) => {
                    entry.insert(ResolvedAttribute {
                        symbol: attr,
                        lineage: vec![ty],
                    });
                }
            }
        }
    }

    resolved
}

/// Public names alphabetically, then underscored names alphabetically
pub fn presort_public_first<'r>(
    resolved: IndexMap<&'r str, ResolvedAttribute<'r>>,
) -> Vec<(&'r str, ResolvedAttribute<'r>)> {
    let mut sorted: Vec<_> = resolved.into_iter().collect();
    sorted.sort_by(|a, b| {
        is_private_name(a.0)
            .cmp(&is_private_name(b.0))
            .then_with(|| a.0.cmp(b.0))
    });
    sorted
}

/// Constructor first, then fields, properties and callable members; each
/// group keeps the incoming order
pub fn group_class_members(members: Vec<ClassMemberDescriptor<'_>>) -> Vec<ClassMemberDescriptor<'_>> {
    let mut constructor = Vec::new();
    let mut fields = Vec::new();
    let mut properties = Vec::new();
    let mut methods = Vec::new();

    for member in members {
        if member.is_constructor() {
            constructor.push(member);
        } else if member.is_field() {
            fields.push(member);
        } else if member.is_property() {
            properties.push(member);
        } else {
            methods.push(member);
        }
    }

    constructor
        .into_iter()
        .chain(fields)
        .chain(properties)
        .chain(methods)
        .collect()
}

/// Members visible on `class`, lineage-resolved, sorted and grouped
pub fn resolve_class_members<'r, R>(
    reflection: &'r R,
    class: &'r TypeRecord,
) -> Vec<ClassMemberDescriptor<'r>>
where
    R: Reflection + ?Sized,
{
    let order = reflection.resolution_order(class);
    let resolved = fold_lineage(reflection, &order);

    let members = presort_public_first(resolved)
        .into_iter()
        .map(|(name, attr)| ClassMemberDescriptor::new(name, attr.symbol, attr.lineage))
        .collect();

    group_class_members(members)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Binding, SymbolTable, ROOT_TYPE};
    use crate::reflection::TableReflection;
    use pretty_assertions::assert_eq;

    fn names(members: &[ClassMemberDescriptor]) -> Vec<String> {
        members.iter().map(|m| m.name.clone()).collect()
    }

    fn lineage(member: &ClassMemberDescriptor) -> Vec<String> {
        member.lineage.iter().map(|t| t.id()).collect()
    }

    fn animals() -> TableReflection {
        let table = SymbolTable::new()
            .with_type(
                TypeRecord::new("zoo", "Animal")
                    .with_attribute("__init__", ClassAttribute::method("(self, name)", Binding::Instance))
                    .with_attribute("__repr__", ClassAttribute::method("(self)", Binding::Instance))
                    .with_attribute("x", ClassAttribute::field("1"))
                    .with_attribute("speak", ClassAttribute::method("(self)", Binding::Instance))
                    .with_attribute("_secret", ClassAttribute::field("None")),
            )
            .with_type(
                TypeRecord::new("zoo", "Mammal")
                    .with_bases(["zoo.Animal"])
                    .with_mro(["zoo.Mammal", "zoo.Animal", ROOT_TYPE])
                    .with_attribute("legs", ClassAttribute::property(true, true, false)),
            )
            .with_type(
                TypeRecord::new("zoo", "Dog")
                    .with_bases(["zoo.Mammal"])
                    .with_mro(["zoo.Dog", "zoo.Mammal", "zoo.Animal", ROOT_TYPE])
                    .with_attribute("x", ClassAttribute::field("2"))
                    .with_attribute("Breed", ClassAttribute::field("'lab'"))
                    .with_attribute("create", ClassAttribute::method("(cls)", Binding::Class)),
            );
        TableReflection::new(table)
    }

    #[test]
    fn test_override_lineage_nearest_first() {
        let reflection = animals();
        let dog = reflection.lookup_type("zoo.Dog").unwrap();
        let members = resolve_class_members(&reflection, dog);

        let x = members.iter().find(|m| m.name == "x").unwrap();
        assert_eq!(lineage(x), vec!["zoo.Dog", "zoo.Animal"]);
        assert_eq!(x.symbol.value.as_deref(), Some("2"));

        let legs = members.iter().find(|m| m.name == "legs").unwrap();
        assert_eq!(lineage(legs), vec!["zoo.Mammal"]);
    }

    #[test]
    fn test_lineage_only_holds_declaring_types() {
        let reflection = animals();
        let dog = reflection.lookup_type("zoo.Dog").unwrap();
        for member in resolve_class_members(&reflection, dog) {
            for ty in &member.lineage {
                assert!(
                    ty.attributes.contains_key(&member.name),
                    "{} does not declare {}",
                    ty.id(),
                    member.name
                );
            }
        }
    }

    #[test]
    fn test_member_order() {
        let reflection = animals();
        let dog = reflection.lookup_type("zoo.Dog").unwrap();
        let members = resolve_class_members(&reflection, dog);
        assert_eq!(
            names(&members),
            vec!["__init__", "Breed", "x", "_secret", "legs", "create", "speak"]
        );
    }

    #[test]
    fn test_constructor_always_first() {
        let reflection = animals();
        let animal = reflection.lookup_type("zoo.Animal").unwrap();
        let members = resolve_class_members(&reflection, animal);
        assert!(members[0].is_constructor());
        assert!(!names(&members).contains(&"__repr__".to_string()));
    }

    #[test]
    fn test_sorting_is_deterministic() {
        let reflection = animals();
        let dog = reflection.lookup_type("zoo.Dog").unwrap();
        let first = names(&resolve_class_members(&reflection, dog));
        let second = names(&resolve_class_members(&reflection, dog));
        assert_eq!(first, second);
    }

    #[test]
    fn test_same_name_from_unrelated_branches_merges() {
        let table = SymbolTable::new()
            .with_type(
                TypeRecord::new("m", "Left")
                    .with_attribute("run", ClassAttribute::method("(self)", Binding::Instance)),
            )
            .with_type(
                TypeRecord::new("m", "Right")
                    .with_attribute("run", ClassAttribute::method("(self, fast)", Binding::Instance)),
            )
            .with_type(
                TypeRecord::new("m", "Both")
                    .with_bases(["m.Left", "m.Right"])
                    .with_mro(["m.Both", "m.Left", "m.Right", ROOT_TYPE]),
            );
        let reflection = TableReflection::new(table);
        let both = reflection.lookup_type("m.Both").unwrap();
        let members = resolve_class_members(&reflection, both);

        assert_eq!(members.len(), 1);
        assert_eq!(lineage(&members[0]), vec!["m.Left", "m.Right"]);
        assert_eq!(members[0].signature, Some("(self)"));
    }

    #[test]
    fn test_module_members_without_exports() {
        let module = ModuleRecord::new("pkg.mod")
            .with_attribute("local", AttributeRecord::function("pkg.mod", "()"))
            .with_attribute("imported", AttributeRecord::function("os.path", "(p)"))
            .with_attribute("__doc__", AttributeRecord::data("pkg.mod", "None"))
            .with_attribute("CONST", AttributeRecord {
                value: Some("1".to_string()),
                ..Default::default()
            });

        let names: Vec<_> = select_module_members(&module)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["CONST", "local"]);
    }

    #[test]
    fn test_module_members_with_exports() {
        let module = ModuleRecord::new("pkg.__init__")
            .with_exports(["b", "__version__", "a", "missing"])
            .with_attribute("b", AttributeRecord::function("pkg.other", "()"))
            .with_attribute("a", AttributeRecord::class("pkg.other", "pkg.other.A"))
            .with_attribute("__version__", AttributeRecord::data("pkg.__init__", "'1.0'"))
            .with_attribute("hidden", AttributeRecord::data("pkg.__init__", "0"));

        let names: Vec<_> = select_module_members(&module)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["__version__", "a", "b"]);
    }
}
