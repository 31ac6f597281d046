//! The process-wide registry is shared by every test in this binary, so each
//! test registers its own schema names.
use std::thread;

use schema_builder::{Builder, SchemaError, TypedBuilder, get, is_registered, register};
use serde_json::{Value, json};

#[test]
fn user_scenario() {
    register("user", ["name", "age"]).unwrap();

    let record = get("user")
        .unwrap()
        .invoke("$name", "Ada")
        .unwrap()
        .invoke("$age", 30)
        .unwrap()
        .build();
    assert_eq!(Value::Object(record), json!({ "name": "Ada", "age": 30 }));

    assert_eq!(get("unknown").unwrap_err(), SchemaError::UnknownSchema("unknown".to_string()));
    assert_eq!(
        register("user", ["email"]).unwrap_err(),
        SchemaError::DuplicateSchema("user".to_string())
    );

    // first registration still governs the builder
    assert!(get("user").unwrap().set("email", "ada@example.com").is_err());
    assert!(get("user").unwrap().set("name", "Ada").is_ok());
}

#[test]
fn fresh_builder_is_empty() {
    register("empty-build", ["a", "b"]).unwrap();
    assert!(get("empty-build").unwrap().build().is_empty());
}

#[test]
fn order_independent_and_last_write_wins() {
    register("point", ["x", "y"]).unwrap();

    let xy = get("point").unwrap().set("x", 1).unwrap().set("y", 2).unwrap().build();
    let yx = get("point").unwrap().set("y", 2).unwrap().set("x", 1).unwrap().build();
    assert_eq!(xy, yx);

    let overwritten = get("point").unwrap().set("x", 1).unwrap().set("x", 5).unwrap().build();
    assert_eq!(Value::Object(overwritten), json!({ "x": 5 }));
}

#[test]
fn branching_from_shared_base() {
    register("branch", ["k1", "k2"]).unwrap();
    let base = get("branch").unwrap().set("k1", "a").unwrap();

    let b = base.set("k2", "b").unwrap().build();
    let c = base.set("k2", "c").unwrap().build();
    assert_eq!(Value::Object(b), json!({ "k1": "a", "k2": "b" }));
    assert_eq!(Value::Object(c), json!({ "k1": "a", "k2": "c" }));
    assert_eq!(Value::Object(base.build()), json!({ "k1": "a" }));
}

#[test]
fn builders_are_shareable_across_threads() {
    register("threaded", ["id", "worker"]).unwrap();
    let base: Builder = get("threaded").unwrap().set("id", 7).unwrap();

    let handles = (0..4)
        .map(|worker| {
            let base = base.clone();
            thread::spawn(move || base.set("worker", worker).unwrap().build())
        })
        .collect::<Vec<_>>();

    for (worker, handle) in handles.into_iter().enumerate() {
        let record = handle.join().unwrap();
        assert_eq!(Value::Object(record), json!({ "id": 7, "worker": worker }));
    }
    assert_eq!(base.len(), 1);
}

schema_builder::schema! {
    struct BookBuilder for "book" {
        title: String,
        pages: u32,
        in_print: bool,
    }
}

#[test]
fn typed_builder_over_global_registry() {
    assert!(matches!(BookBuilder::get(), Err(SchemaError::UnknownSchema(_))));
    BookBuilder::register().unwrap();
    assert!(is_registered(BookBuilder::NAME));

    let record = BookBuilder::get()
        .unwrap()
        .title("Dune".to_string())
        .pages(412)
        .in_print(true)
        .build();
    assert_eq!(
        Value::Object(record),
        json!({ "title": "Dune", "pages": 412, "in_print": true })
    );

    // the dynamic path sees the same schema
    let dynamic = get("book").unwrap().invoke("$pages", 10).unwrap();
    let typed = BookBuilder::bind(dynamic).unwrap().title("x".to_string());
    assert_eq!(typed.as_builder().len(), 2);
}
