//! Fixtures shared by presence integration tests.
use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use presence_core::{
    ApplicationData, FileData, IconSet, LocalAsset, PresenceData, ProjectData, RenderContext,
};

mod transport;

pub use transport::{StaticResponse, StaticTransport};

pub const APPLICATION_ID: &str = "782685898163617802";
pub const APPLICATION_STARTED_AT: i64 = 1_712_059_200_000;

pub fn solid_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0x2b, 0x2d, 0x30, 0xff])))
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    solid_image(width, height)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .expect("encode png fixture");
    bytes
}

pub fn application() -> ApplicationData {
    ApplicationData {
        name: "IntelliJ IDEA".into(),
        version: Some("2024.1".into()),
        started_at: Some(APPLICATION_STARTED_AT),
    }
}

pub fn project(name: &str) -> ProjectData {
    ProjectData {
        name: name.into(),
        description: Some("A demo project".into()),
        opened_at: Some(APPLICATION_STARTED_AT + 60_000),
    }
}

pub fn file(name: &str, language: &str) -> FileData {
    FileData {
        name: name.into(),
        path: Some(format!("src/{name}")),
        language: Some(language.into()),
        opened_at: Some(APPLICATION_STARTED_AT + 120_000),
    }
}

/// Icons for the application plus Rust and a generic fallback, at two sizes each.
pub fn icon_set() -> IconSet {
    let icon = |key: &str| {
        LocalAsset::new(key, solid_image(32, 32)).with_rendition(solid_image(256, 256))
    };
    IconSet::new("classic")
        .with_application(icon("application"))
        .with_language("Rust", icon("rust"))
        .with_fallback_language(icon("text"))
}

pub fn application_context() -> RenderContext {
    RenderContext::new(PresenceData {
        application: Some(application()),
        ..Default::default()
    })
    .with_application_id(APPLICATION_ID)
}

pub fn project_context(name: &str) -> RenderContext {
    RenderContext::new(PresenceData {
        application: Some(application()),
        project: Some(project(name)),
        ..Default::default()
    })
    .with_application_id(APPLICATION_ID)
}

pub fn file_context() -> RenderContext {
    RenderContext::new(PresenceData {
        application: Some(application()),
        project: Some(project("demo")),
        file: Some(file("main.rs", "Rust")),
        idle: false,
    })
    .with_application_id(APPLICATION_ID)
    .with_icons(icon_set())
}

/// Idle user who still has a project and file open.
pub fn idle_context() -> RenderContext {
    RenderContext::new(PresenceData {
        idle: true,
        application: Some(application()),
        project: Some(project("secret")),
        file: Some(file("main.rs", "Rust")),
    })
    .with_application_id(APPLICATION_ID)
}
