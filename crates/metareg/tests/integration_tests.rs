//! Integration tests for metareg registries.
//!
//! Centers are process-wide and tests run in parallel, so every test declares
//! its own registry types.

use metareg::{
    ancestors, annotation_registry, inheritance_registry, inheritance_root, meta, merge_kwargs,
    metadata_center, subtype, AnnotationRegistry, Definition, Derived, InheritanceRegistry,
    Kwargs, Lineage, MetadataCenter, Query, RegistryError, RegistrySettings, Result, TypeKey,
};
use serde::{Deserialize, Serialize};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Annotation Registry
// =============================================================================

struct ToolOne;
struct ToolTwo;

fn tool_name(key: TypeKey) -> &'static str {
    key.short_name()
}

#[test]
fn test_annotation_round_trip() {
    init_tracing();
    annotation_registry!(FakeTool: TypeKey => Kwargs);

    let returned = FakeTool::register(meta! { name: "one", limit: 9 })
        .apply(TypeKey::of::<ToolOne>())
        .unwrap();

    assert_eq!(returned, Some(TypeKey::of::<ToolOne>()));
    assert!(FakeTool::registered(&TypeKey::of::<ToolOne>()));
    assert_eq!(
        FakeTool::meta_of(&TypeKey::of::<ToolOne>()).unwrap(),
        meta! { name: "one", limit: 9 }
    );
}

#[test]
fn test_annotation_overwrite() {
    annotation_registry!(Toolbox: TypeKey => Kwargs);
    let hammer = TypeKey::of::<ToolOne>();

    Toolbox::register(meta! { name: "hammer" }).apply(hammer).unwrap();
    Toolbox::register(meta! { name: "mallet" }).apply(hammer).unwrap();

    assert_eq!(Toolbox::len(), 1);
    assert_eq!(Toolbox::meta_of(&hammer).unwrap(), meta! { name: "mallet" });
    assert_eq!(Toolbox::query(meta! { name: "hammer" }), None);
}

#[test]
fn test_annotation_unregister_removes() {
    annotation_registry!(Drawer: TypeKey => Kwargs);
    let item = TypeKey::of::<ToolTwo>();

    Drawer::register(meta! { name: "two" }).apply(item).unwrap();
    Drawer::unregister(&item).unwrap();

    assert!(!Drawer::registered(&item));
    assert!(matches!(
        Drawer::meta_of(&item),
        Err(RegistryError::KeyNotFound(_))
    ));
    assert!(matches!(
        Drawer::unregister(&item),
        Err(RegistryError::KeyNotFound(_))
    ));
}

#[test]
fn test_annotation_partial_match_query() {
    annotation_registry!(Shelf: TypeKey => Kwargs);
    let a = TypeKey::of::<ToolOne>();
    let b = TypeKey::of::<ToolTwo>();
    Shelf::register(meta! { name: "one", limit: 9 }).apply(a).unwrap();
    Shelf::register(meta! { name: "two" }).apply(b).unwrap();

    assert_eq!(Shelf::query(meta! { name: "one" }), Some(a));
    assert_eq!(Shelf::query(meta! { name: "one", limit: 9 }), Some(a));
    assert_eq!(Shelf::query(meta! { name: "one", limit: 3 }), None);
    assert_eq!(Shelf::query(meta! { name: "missing" }), None);
    assert_eq!(Shelf::query(meta! { name: "two" }).map(tool_name), Some("ToolTwo"));
}

#[test]
fn test_annotation_predicate_overrides_partial() {
    annotation_registry!(Rack: TypeKey => Kwargs);
    let a = TypeKey::of::<ToolOne>();
    let b = TypeKey::of::<ToolTwo>();
    Rack::register(meta! { name: "one", limit: 9 }).apply(a).unwrap();
    Rack::register(meta! { name: "two" }).apply(b).unwrap();

    let query = Query::partial(meta! { name: "one" }).predicate(|m: &Kwargs| m["name"] == "two");
    assert_eq!(Rack::query(query), Some(b));
    assert_eq!(Rack::query(Query::matching(|m: &Kwargs| m.contains_key("limit"))), Some(a));
    assert_eq!(Rack::query(Query::matching(|_: &Kwargs| false)), None);
}

#[test]
fn test_annotation_keep_original_false() {
    annotation_registry!(Hidden: TypeKey => Kwargs);
    let item = TypeKey::of::<ToolTwo>();

    let returned = Hidden::register(meta! { name: "two" })
        .keep_original(false)
        .apply(item)
        .unwrap();

    assert_eq!(returned, None);
    assert_eq!(Hidden::query(meta! { name: "two" }), Some(item));
    assert_eq!(Hidden::meta_of(&item).unwrap(), meta! { name: "two" });
}

#[test]
fn test_annotation_functions_as_items() {
    annotation_registry!(Handlers: fn(i32) -> i32 => Kwargs);

    fn double(x: i32) -> i32 {
        x * 2
    }
    fn negate(x: i32) -> i32 {
        -x
    }

    Handlers::register(meta! { op: "double" })
        .apply(double as fn(i32) -> i32)
        .unwrap();
    Handlers::register(meta! { op: "negate" })
        .apply(negate as fn(i32) -> i32)
        .unwrap();

    let handler = Handlers::query(meta! { op: "negate" }).unwrap();
    assert_eq!(handler(21), -21);
    let handler = Handlers::query(meta! { op: "double" }).unwrap();
    assert_eq!(handler(21), 42);
}

#[test]
fn test_independent_centers() {
    annotation_registry!(Left: TypeKey => Kwargs);
    annotation_registry!(Right: TypeKey => Kwargs);
    inheritance_registry!(Upper => Kwargs);
    subtype!(UpperOne: Upper);
    inheritance_registry!(Lower => Kwargs);

    let item = TypeKey::of::<ToolOne>();
    Left::register(meta! { name: "one" }).apply(item).unwrap();
    UpperOne::define(meta! { name: "one" }).unwrap();

    assert!(Left::registered(&item));
    assert!(!Right::registered(&item));
    assert_eq!(Right::query(meta! { name: "one" }), None);
    assert!(Upper::registered_type::<UpperOne>());
    assert!(!Lower::registered(&UpperOne::key()));
    assert_eq!(Lower::query(Query::<Kwargs>::all()), None);
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ToolMeta {
    name: String,
    #[serde(default)]
    limit: Option<u32>,
}

#[test]
fn test_annotation_constrained_shape() {
    annotation_registry!(TypedBox: &'static str => ToolMeta);

    TypedBox::register(meta! { name: "one", limit: 9 })
        .apply("ToolOne")
        .unwrap();
    TypedBox::register(meta! { name: "two" }).apply("ToolTwo").unwrap();

    assert_eq!(
        TypedBox::meta_of(&"ToolOne").unwrap(),
        ToolMeta {
            name: "one".to_string(),
            limit: Some(9)
        }
    );
    assert_eq!(TypedBox::query(meta! { limit: 9 }), Some("ToolOne"));
    assert_eq!(
        TypedBox::query(Query::matching(|m: &ToolMeta| m.limit.is_none())),
        Some("ToolTwo")
    );

    let err = TypedBox::register(meta! { limit: 1 })
        .apply("Nameless")
        .unwrap_err();
    assert!(matches!(err, RegistryError::ConstructionError(_)));
    assert!(!TypedBox::registered(&"Nameless"));
}

struct Palette;

impl AnnotationRegistry for Palette {
    type Item = &'static str;
    type Meta = Kwargs;

    fn center() -> &'static MetadataCenter<&'static str, Kwargs> {
        metadata_center!(&'static str, Kwargs)
    }

    fn settings() -> RegistrySettings {
        RegistrySettings::from_yaml("name: palette\nfallback:\n  color: black\n")
            .unwrap_or_else(|_| RegistrySettings::named("palette"))
    }
}

#[test]
fn test_annotation_settings_fallback() {
    Palette::register(meta! {}).apply("ink").unwrap();
    Palette::register(meta! { color: "red" }).apply("brick").unwrap();

    assert_eq!(Palette::meta_of(&"ink").unwrap(), meta! { color: "black" });
    assert_eq!(Palette::meta_of(&"brick").unwrap(), meta! { color: "red" });
    assert_eq!(Palette::settings().name, "palette");
}

// =============================================================================
// Inheritance Registry
// =============================================================================

#[test]
fn test_inheritance_registration() {
    init_tracing();
    inheritance_registry!(Tool => Kwargs);
    subtype!(Hammer: Tool);

    Hammer::define(meta! { name: "hammer" }).unwrap();

    assert_eq!(Tool::query(meta! { name: "hammer" }), Some(TypeKey::of::<Hammer>()));
    assert_eq!(
        Tool::meta_of(&TypeKey::of::<Hammer>()).unwrap(),
        meta! { name: "hammer" }
    );
    assert_eq!(Hammer::meta().unwrap(), meta! { name: "hammer" });
    assert!(!Tool::registered(&Tool::key()));
    assert_eq!(Tool::query(meta! { name: "hammer" }).map(tool_name), Some("Hammer"));
}

#[test]
fn test_inheritance_multi_level() {
    inheritance_registry!(Tool => Kwargs);
    subtype!(One: Tool);
    subtype!(Three: One);

    One::define(meta! { name: "one" }).unwrap();
    Three::define(meta! { name: "three", nested: true }).unwrap();

    assert_eq!(Tool::query(meta! { name: "one" }), Some(One::key()));
    assert_eq!(Tool::query(meta! { name: "three" }), Some(Three::key()));
    assert_eq!(Tool::meta_of_type::<Three>().unwrap()["nested"], true);
    assert_eq!(
        Tool::meta_of_type::<Three>().unwrap(),
        meta! { name: "three", nested: true }
    );
    assert_eq!(Tool::subtypes(), vec![One::key(), Three::key()]);
    assert_eq!(ancestors(&Three::key()), vec![One::key(), Tool::key()]);
}

#[test]
fn test_inheritance_unregister_does_not_cascade() {
    inheritance_registry!(Vehicle => Kwargs);
    subtype!(Car: Vehicle);
    subtype!(Coupe: Car);

    Car::define(meta! { wheels: 4 }).unwrap();
    Coupe::define(meta! { doors: 2 }).unwrap();
    Vehicle::unregister(&Car::key()).unwrap();

    assert!(!Vehicle::registered_type::<Car>());
    assert!(Vehicle::registered_type::<Coupe>());
    assert!(matches!(
        Vehicle::unregister(&Car::key()),
        Err(RegistryError::KeyNotFound(_))
    ));
}

#[test]
fn test_inheritance_predicate_query() {
    inheritance_registry!(Instrument => Kwargs);
    subtype!(Violin: Instrument);
    subtype!(Cello: Instrument);

    Violin::define(meta! { name: "violin", strings: 4 }).unwrap();
    Cello::define(meta! { name: "cello", strings: 4 }).unwrap();

    assert_eq!(Instrument::query(meta! { strings: 4 }), Some(Violin::key()));
    let query =
        Query::partial(meta! { name: "violin" }).predicate(|m: &Kwargs| m["name"] == "cello");
    assert_eq!(Instrument::query(query), Some(Cello::key()));
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct CodecMeta {
    name: String,
    lossless: bool,
}

#[test]
fn test_inheritance_constrained_shape_rejects_at_definition() {
    inheritance_registry!(Codec => CodecMeta);
    subtype!(Flac: Codec);
    subtype!(Broken: Codec);
    subtype!(Chatty: Codec);

    Flac::define(meta! { name: "flac", lossless: true }).unwrap();
    assert_eq!(
        Flac::meta().unwrap(),
        CodecMeta {
            name: "flac".to_string(),
            lossless: true
        }
    );

    let err = Broken::define(meta! { name: "broken" }).unwrap_err();
    assert!(matches!(err, RegistryError::ConstructionError(_)));
    assert!(!Codec::registered_type::<Broken>());

    assert!(Chatty::define(meta! { name: "chatty", lossless: false, extra: 1 }).is_err());
    assert!(!Codec::registered_type::<Chatty>());
}

// A root whose construction hook inherits the parent's metadata.
struct Gadget;

impl InheritanceRegistry for Gadget {
    type Meta = Kwargs;

    fn center() -> &'static MetadataCenter<TypeKey, Kwargs> {
        metadata_center!(TypeKey, Kwargs)
    }

    fn make_meta(definition: &Definition, kwargs: Kwargs) -> Result<Kwargs> {
        let inherited = definition.parent_meta::<Self>()?.unwrap_or_default();
        let mut meta = merge_kwargs(inherited, kwargs);
        meta.insert("depth".to_string(), definition.depth.into());
        Ok(meta)
    }

    fn check_meta(meta: Kwargs) -> Result<Kwargs> {
        if !meta.contains_key("name") {
            return Err(RegistryError::construction("gadgets need a name"));
        }
        Ok(meta)
    }
}

inheritance_root!(Gadget);
subtype!(Phone: Gadget);
subtype!(SmartPhone: Phone);
subtype!(Nameless: Gadget);

#[test]
fn test_inheritance_merging_hook() {
    Phone::define(meta! { name: "phone", wired: false }).unwrap();
    SmartPhone::define(meta! { name: "smartphone", apps: true }).unwrap();

    assert_eq!(
        SmartPhone::meta().unwrap(),
        meta! { name: "smartphone", wired: false, apps: true, depth: 2 }
    );
    assert_eq!(Phone::meta().unwrap()["depth"], 1);
    assert_eq!(Gadget::query(meta! { wired: false }), Some(Phone::key()));

    let err = Nameless::define(meta! { wired: true }).unwrap_err();
    assert_eq!(err.to_string(), "META/gadgets need a name");
    assert!(!Gadget::registered_type::<Nameless>());
    assert!(metareg::lineage::definition(&Nameless::key()).is_none());
}

// A root that substitutes a canned default for empty metadata.
struct Widget;

impl InheritanceRegistry for Widget {
    type Meta = Kwargs;

    fn center() -> &'static MetadataCenter<TypeKey, Kwargs> {
        metadata_center!(TypeKey, Kwargs)
    }

    fn check_meta(meta: Kwargs) -> Result<Kwargs> {
        if meta.is_empty() {
            return Ok(meta! { name: "widget", visible: true });
        }
        Ok(meta)
    }
}

inheritance_root!(Widget);

struct Button {
    label: &'static str,
}

subtype!(impl Button: Widget);
subtype!(Slider: Widget);

#[test]
fn test_inheritance_check_meta_fallback() {
    Button::define(meta! {}).unwrap();
    Slider::define(meta! { name: "slider" }).unwrap();

    assert_eq!(Button::meta().unwrap(), meta! { name: "widget", visible: true });
    assert_eq!(Slider::meta().unwrap(), meta! { name: "slider" });

    let found = Widget::query(meta! { visible: true }).unwrap();
    assert!(found.is::<Button>());
    assert_eq!(Button { label: "ok" }.label, "ok");
}
