use crate::{field::FieldRef, value::{TypeTag, Value}};

///
/// ValueExtractor
///
/// The out-of-scope "value extractor" collaborator (§4.3): pulls the typed
/// boundary value for one field off one row. The engine calls this once per
/// field, per boundary row, to build the outgoing cursor.
///
/// Implemented once per row type by the host application. A blanket impl
/// over `Fn(&R, &FieldRef) -> (TypeTag, Value)` is provided below so ad-hoc
/// closures can be passed directly as the `value_fun` option (§6), which is
/// the escape hatch the spec calls out for joins the engine cannot guess the
/// path through. [`DefaultExtractor`] below covers the common case without
/// requiring a closure at all.
///

pub trait ValueExtractor<R> {
    fn extract(&self, row: &R, field: &FieldRef) -> (TypeTag, Value);
}

impl<R, F> ValueExtractor<R> for F
where
    F: Fn(&R, &FieldRef) -> (TypeTag, Value),
{
    fn extract(&self, row: &R, field: &FieldRef) -> (TypeTag, Value) {
        self(row, field)
    }
}

///
/// RowAccess
///
/// The reflection-free row-access collaborator behind [`DefaultExtractor`]
/// (§4.3's default `value_fn`): a row type implements this once, exposing
/// its own columns plus its one-hop preloaded associations, and never has
/// to hand-write a per-field closure.
///

pub trait RowAccess {
    /// This row's own `column` attribute, or `None` if the row carries no
    /// such column at all.
    fn attribute(&self, column: &str) -> Option<(TypeTag, Value)>;

    /// The preloaded association reached through `binding`, or `None` if
    /// this row type has no such association.
    fn association(&self, binding: &str) -> Option<&dyn RowAccess>;
}

///
/// DefaultExtractor
///
/// §4.3's default `value_fn`, generalized over any [`RowAccess`] row type:
///
/// 1. A plain column resolves against the row itself.
/// 2. A bound column first checks the root row — the binding may alias back
///    to it — then descends one hop into the named association.
///
/// Panics if a field named by an already-normalized [`crate::field::FieldSpec`]
/// is absent from the row or its association: by the time extraction runs,
/// [`crate::field::SchemaReflect`] has already confirmed the field exists,
/// so a miss here means the `RowAccess` impl disagrees with the schema, not
/// that the caller supplied a bad field.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultExtractor;

impl<R: RowAccess> ValueExtractor<R> for DefaultExtractor {
    fn extract(&self, row: &R, field: &FieldRef) -> (TypeTag, Value) {
        match field {
            FieldRef::Plain(column) => row
                .attribute(column)
                .unwrap_or_else(|| panic!("row has no attribute `{column}`")),
            FieldRef::Bound(binding, column) => row.attribute(column).unwrap_or_else(|| {
                row.association(binding)
                    .unwrap_or_else(|| panic!("row has no association `{binding}`"))
                    .attribute(column)
                    .unwrap_or_else(|| panic!("association `{binding}` has no attribute `{column}`"))
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultExtractor, RowAccess, ValueExtractor};
    use crate::{field::FieldRef, value::{TypeTag, Value}};

    struct Row {
        id: i64,
    }

    #[test]
    fn closures_satisfy_value_extractor() {
        let extractor = |row: &Row, field: &FieldRef| -> (TypeTag, Value) {
            assert_eq!(field.column(), "id");
            (TypeTag::Id, Value::Id(row.id))
        };

        let row = Row { id: 42 };
        let (tag, value) = extractor.extract(&row, &FieldRef::Plain("id".into()));
        assert_eq!(tag, TypeTag::Id);
        assert_eq!(value, Value::Id(42));
    }

    struct Customer {
        id: i64,
        country: String,
    }

    struct Payment {
        id: i64,
        amount: i64,
        customer: Customer,
    }

    impl RowAccess for Customer {
        fn attribute(&self, column: &str) -> Option<(TypeTag, Value)> {
            match column {
                "id" => Some((TypeTag::Id, Value::Id(self.id))),
                "country" => Some((TypeTag::String, Value::String(self.country.clone()))),
                _ => None,
            }
        }

        fn association(&self, _binding: &str) -> Option<&dyn RowAccess> {
            None
        }
    }

    impl RowAccess for Payment {
        fn attribute(&self, column: &str) -> Option<(TypeTag, Value)> {
            match column {
                "id" => Some((TypeTag::Id, Value::Id(self.id))),
                "amount" => Some((TypeTag::Integer, Value::Integer(self.amount))),
                _ => None,
            }
        }

        fn association(&self, binding: &str) -> Option<&dyn RowAccess> {
            match binding {
                "customer" => Some(&self.customer),
                _ => None,
            }
        }
    }

    fn payment() -> Payment {
        Payment {
            id: 1,
            amount: 500,
            customer: Customer {
                id: 9,
                country: "NZ".into(),
            },
        }
    }

    #[test]
    fn default_extractor_resolves_plain_columns() {
        let (tag, value) = DefaultExtractor.extract(&payment(), &FieldRef::Plain("amount".into()));
        assert_eq!(tag, TypeTag::Integer);
        assert_eq!(value, Value::Integer(500));
    }

    #[test]
    fn default_extractor_prefers_root_attribute_when_binding_aliases_it() {
        // "id" exists directly on Payment, so the `customer` binding aliases
        // back to the root rather than descending into the association.
        let (tag, value) =
            DefaultExtractor.extract(&payment(), &FieldRef::Bound("customer".into(), "id".into()));
        assert_eq!(tag, TypeTag::Id);
        assert_eq!(value, Value::Id(1));
    }

    #[test]
    fn default_extractor_descends_into_association_when_root_lacks_the_column() {
        let (tag, value) =
            DefaultExtractor.extract(&payment(), &FieldRef::Bound("customer".into(), "country".into()));
        assert_eq!(tag, TypeTag::String);
        assert_eq!(value, Value::String("NZ".into()));
    }

    #[test]
    #[should_panic(expected = "row has no association `shipping`")]
    fn default_extractor_panics_on_unknown_association() {
        DefaultExtractor.extract(&payment(), &FieldRef::Bound("shipping".into(), "country".into()));
    }
}
