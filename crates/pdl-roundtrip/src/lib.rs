//! Bindings generated from `schemas/*.pdl` by the build script.
//!
//! Each schema lives in its own module; a schema that inherits or includes
//! another imports that schema's module so `common::Common` resolves.

use pdl_core::SchemaRegistry;

pub mod case {
    include!(concat!(env!("OUT_DIR"), "/case_deps.rs"));
    include!(concat!(env!("OUT_DIR"), "/case.rs"));
}

pub mod common {
    include!(concat!(env!("OUT_DIR"), "/common_deps.rs"));
    include!(concat!(env!("OUT_DIR"), "/common.rs"));
}

pub mod piso {
    use super::common;

    include!(concat!(env!("OUT_DIR"), "/piso_deps.rs"));
    include!(concat!(env!("OUT_DIR"), "/piso.rs"));
}

pub mod toggle {
    include!(concat!(env!("OUT_DIR"), "/toggle_deps.rs"));
    include!(concat!(env!("OUT_DIR"), "/toggle.rs"));
}

pub mod samples {
    include!(concat!(env!("OUT_DIR"), "/samples_deps.rs"));
    include!(concat!(env!("OUT_DIR"), "/samples.rs"));
}

pub mod study {
    use super::common;

    include!(concat!(env!("OUT_DIR"), "/study_deps.rs"));
    include!(concat!(env!("OUT_DIR"), "/study.rs"));
}

/// Every generated schema, by name.
pub fn registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .register(case::Case::SCHEMA_NAME, case::Case::make_default)
        .register(common::Common::SCHEMA_NAME, common::Common::make_default)
        .register(piso::Piso::SCHEMA_NAME, piso::Piso::make_default)
        .register(toggle::Toggle::SCHEMA_NAME, toggle::Toggle::make_default)
        .register(samples::Samples::SCHEMA_NAME, samples::Samples::make_default)
        .register(study::Study::SCHEMA_NAME, study::Study::make_default);
    registry
}
