const SCHEMAS: &[&str] = &[
    "schemas/case.pdl",
    "schemas/common.pdl",
    "schemas/piso.pdl",
    "schemas/toggle.pdl",
    "schemas/samples.pdl",
    "schemas/study.pdl",
];

fn main() {
    if let Err(err) = pdl_compiler::build::Config::new()
        .files(SCHEMAS.iter().copied())
        .compile()
    {
        panic!("{err}");
    }
}
