#[cfg(test)]
#[allow(dead_code, unused)]
mod tests {
    use odm_query::errors::ErrorKind;
    use odm_query::registry::Mapped;
    use odm_query::{key, Expression};
    use odm_query_derive::Mapped;
    use odm_query_int_test::test_util::{Bar, Point};

    #[ctor::ctor]
    fn init() {
        colog::init();
    }

    #[test]
    fn test_fields_registered_in_declaration_order() {
        let registry = Bar::registry();
        assert_eq!(registry.size(), 5);
        assert_eq!(registry.field_names(), vec!["w", "x1", "x2", "y", "z"]);
        assert!(registry.owner().ends_with("Bar"));

        for (position, descriptor) in registry.iter().enumerate() {
            assert_eq!(descriptor.position(), position);
        }
        assert!(registry.descriptor_at(5).is_none());
    }

    #[test]
    fn test_descriptor_types() {
        let registry = Bar::registry();
        let w = registry.descriptor_at(0).unwrap();
        assert!(w.is_declared_as::<i64>());
        assert!(!w.is_declared_as::<i32>());
        assert!(registry.descriptor_at(4).unwrap().is_declared_as::<String>());
    }

    #[test]
    fn test_registry_is_shared() {
        assert!(std::ptr::eq(Point::registry(), Point::registry()));
    }

    #[test]
    fn test_field_rename() {
        #[derive(Mapped)]
        struct Book {
            #[field(name = "book_title")]
            title: String,
            pages: u32,
        }

        let title = key!(Book::title).unwrap();
        assert_eq!(title.name(), "book_title");
        assert_eq!(
            title.eq("Dune").to_document().key_list(),
            "book_title"
        );
        assert_eq!(key!(Book::pages).unwrap().name(), "pages");
    }

    #[test]
    fn test_skipped_field_is_not_registered() {
        #[derive(Mapped)]
        struct Session {
            user: String,
            #[field(skip)]
            token: Vec<u8>,
            expires: i64,
        }

        assert_eq!(Session::registry().field_names(), vec!["user", "expires"]);
        let err = key!(Session::token).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::FieldNotRegistered);
        assert_eq!(key!(Session::expires).unwrap().name(), "expires");
    }

    #[test]
    fn test_skip_and_rename_together() {
        #[derive(Mapped)]
        struct Order {
            #[field(skip)]
            internal_id: u64,
            #[field(name = "total_amount")]
            total: f64,
            #[field(name = "state")]
            status: String,
        }

        let registry = Order::registry();
        assert_eq!(registry.field_names(), vec!["total_amount", "state"]);
        assert_eq!(registry.descriptor_at(0).unwrap().position(), 0);
        assert_eq!(
            key!(Order::total).unwrap().gt(10.5).to_string(),
            "(total_amount > 10.5)"
        );
    }

    #[test]
    fn test_same_typed_fields_resolve_separately() {
        let x1 = key!(Bar::x1).unwrap();
        let x2 = key!(Bar::x2).unwrap();
        assert_eq!(x1.name(), "x1");
        assert_eq!(x2.name(), "x2");
        assert_ne!(x1.accessor().offset(), x2.accessor().offset());
    }
}
