use serde::Serialize;

/// Built-in example documents, served next to the application.
const EXAMPLE_CZML_FILES: [(&str, &str); 6] = [
    ("satellite-orbit", "/czml-examples/satellite-orbit.czml"),
    ("flight-path", "/czml-examples/flight-path.czml"),
    ("buildings-3d", "/czml-examples/buildings-3d.czml"),
    ("weather-radar", "/czml-examples/weather-radar.czml"),
    ("time-series", "/czml-examples/time-series.czml"),
    ("multi-vehicle", "/czml-examples/multi-vehicle.czml"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExampleFile {
    pub name: &'static str,
    pub path: &'static str,
}

#[must_use]
pub fn available_examples() -> Vec<ExampleFile> {
    EXAMPLE_CZML_FILES
        .iter()
        .map(|&(name, path)| ExampleFile { name, path })
        .collect()
}

#[must_use]
pub fn example_path(name: &str) -> Option<&'static str> {
    EXAMPLE_CZML_FILES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, path)| *path)
}
