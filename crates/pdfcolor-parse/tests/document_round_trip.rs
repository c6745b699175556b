//! Color spaces written into a saved PDF and read back.
//!
//! Each test exports filters into a fresh lopdf document, saves it to bytes,
//! reloads it, and inspects the color-space objects the way a reader would.

use std::io::Write;
use std::sync::Arc;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use pdfcolor_parse::pdfcolor_core::{Color, ColorSpaceType, PixelFormat, WarningCode};
use pdfcolor_parse::{
    ColorSpaceFilter, FilterCache, FilterFactory, IndexedFilter, LabFilter, SeparationFilter,
    decode_image, device_cmyk_instance, device_gray_instance, device_rgb_instance,
    try_create_from_object,
};

// --- Helpers ---

/// Store `color_space` as an indirect object, attach a catalog, and
/// return the reloaded document with the color space's id.
fn save_and_reload(mut doc: Document, color_space: Object) -> (Document, ObjectId) {
    let cs_id = doc.add_object(color_space);
    let pages_id = doc.add_object(dictionary! {
        "Type" => "Pages",
        "Kids" => Vec::<Object>::new(),
        "Count" => 0,
    });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).expect("failed to save test PDF");
    let reloaded = Document::load_mem(&buf).expect("failed to reload test PDF");
    (reloaded, cs_id)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap(),
        other => other,
    }
}

fn grayscale_ramp() -> IndexedFilter {
    let lookup: Vec<u8> = (0..=255u8).flat_map(|v| [v, v, v]).collect();
    IndexedFilter::new(device_rgb_instance(), 256, lookup).unwrap()
}

// --- Device spaces ---

#[test]
fn device_spaces_survive_save_and_reload() {
    for filter in [
        device_gray_instance(),
        device_rgb_instance(),
        device_cmyk_instance(),
    ] {
        let mut doc = Document::with_version("1.5");
        let exported = filter.export_object(&mut doc).unwrap();
        let (doc, id) = save_and_reload(doc, exported);

        let parsed = try_create_from_object(&Object::Reference(id), &doc)
            .unwrap()
            .unwrap();
        assert!(Arc::ptr_eq(&parsed, &filter));
    }
}

// --- Indexed ---

#[test]
fn indexed_survives_save_and_reload() {
    let original = ColorSpaceFilter::Indexed(grayscale_ramp());
    let mut doc = Document::with_version("1.5");
    let exported = original.export_object(&mut doc).unwrap();
    let (doc, id) = save_and_reload(doc, exported);

    let parsed = try_create_from_object(&Object::Reference(id), &doc)
        .unwrap()
        .unwrap();
    assert_eq!(*parsed, original);
    assert_eq!(parsed.color_space_type(), ColorSpaceType::Indexed);
    assert_eq!(parsed.pixel_format(), Ok(PixelFormat::RGB));
}

#[test]
fn indexed_with_flate_lookup() {
    let mut doc = Document::with_version("1.5");
    let lookup: Vec<u8> = vec![255, 0, 0, 0, 255, 0, 0, 0, 255];
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&lookup).unwrap();
    let mut stream = Stream::new(
        dictionary! { "Filter" => "FlateDecode" },
        encoder.finish().unwrap(),
    );
    stream.allows_compression = false;
    let lookup_id = doc.add_object(stream);
    let cs = Object::Array(vec![
        Object::Name(b"Indexed".to_vec()),
        Object::Name(b"DeviceRGB".to_vec()),
        Object::Integer(2),
        Object::Reference(lookup_id),
    ]);
    let (doc, id) = save_and_reload(doc, cs);

    let parsed = try_create_from_object(&Object::Reference(id), &doc)
        .unwrap()
        .unwrap();
    match parsed.as_ref() {
        ColorSpaceFilter::Indexed(indexed) => assert_eq!(indexed.lookup(), &lookup[..]),
        other => panic!("expected Indexed, got {other:?}"),
    }
}

#[test]
fn indexed_image_decodes_through_palette() {
    let mut doc = Document::with_version("1.5");
    let image = Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => 2,
            "Height" => 2,
            "BitsPerComponent" => 8,
        },
        vec![0, 64, 128, 255],
    );
    let image_id = doc.add_object(image);
    let cs = ColorSpaceFilter::Indexed(grayscale_ramp())
        .export_object(&mut doc)
        .unwrap();
    let (doc, cs_id) = save_and_reload(doc, cs);

    let filter = try_create_from_object(&Object::Reference(cs_id), &doc)
        .unwrap()
        .unwrap();
    let stream = doc.get_object(image_id).unwrap().as_stream().unwrap();
    let decoded = decode_image(&filter, &stream.content, 2, 2, 8).unwrap();

    assert_eq!(decoded.pixel_format, PixelFormat::RGB);
    assert_eq!(decoded.stride, 6);
    assert_eq!(decoded.row(0), Some(&[0u8, 0, 0, 64, 64, 64][..]));
    assert_eq!(decoded.row(1), Some(&[128u8, 128, 128, 255, 255, 255][..]));
}

#[test]
fn shared_cache_across_images() {
    let mut doc = Document::with_version("1.5");
    let cs = ColorSpaceFilter::Indexed(grayscale_ramp())
        .export_object(&mut doc)
        .unwrap();
    let (doc, id) = save_and_reload(doc, cs);

    let cache = FilterCache::new(&doc);
    let first = FilterFactory::new(&doc)
        .with_cache(&cache)
        .unwrap()
        .try_create(&Object::Reference(id))
        .unwrap()
        .unwrap();
    let second = FilterFactory::new(&doc)
        .with_cache(&cache)
        .unwrap()
        .try_create(&Object::Reference(id))
        .unwrap()
        .unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.len(), 1);
}

// --- Separation ---

#[test]
fn separation_gray_exports_scaled_tint_function() {
    let sep = SeparationFilter::new("Spot", Color::Gray(0.5)).unwrap();
    let mut doc = Document::with_version("1.5");
    let exported = ColorSpaceFilter::Separation(sep)
        .export_object(&mut doc)
        .unwrap();
    let (doc, id) = save_and_reload(doc, exported);

    let arr = doc.get_object(id).unwrap().as_array().unwrap();
    assert_eq!(arr[0], Object::Name(b"Separation".to_vec()));
    assert_eq!(arr[1], Object::Name(b"Spot".to_vec()));
    assert_eq!(arr[2], Object::Name(b"DeviceGray".to_vec()));

    let function = resolve(&doc, &arr[3]).as_stream().unwrap();
    assert_eq!(
        function.dict.get(b"FunctionType").unwrap().as_i64().unwrap(),
        0
    );
    assert_eq!(function.decompressed_content().unwrap(), vec![0, 127]);
}

#[test]
fn separation_is_not_parsed_back() {
    let mut doc = Document::with_version("1.5");
    let exported = ColorSpaceFilter::Separation(SeparationFilter::separation_all())
        .export_object(&mut doc)
        .unwrap();
    let (doc, id) = save_and_reload(doc, exported);

    let mut factory = FilterFactory::new(&doc);
    assert_eq!(factory.try_create(&Object::Reference(id)).unwrap(), None);
    assert_eq!(
        factory.warnings()[0].code,
        WarningCode::UnsupportedColorSpace
    );
}

// --- Lab ---

#[test]
fn lab_exports_inline_dictionary() {
    let lab = LabFilter::new(
        [0.9505, 1.0, 1.089],
        None,
        Some([-128.0, 127.0, -128.0, 127.0]),
    );
    let mut doc = Document::with_version("1.5");
    let exported = ColorSpaceFilter::Lab(lab).export_object(&mut doc).unwrap();
    assert!(doc.objects.is_empty());
    let (doc, id) = save_and_reload(doc, exported);

    let arr = doc.get_object(id).unwrap().as_array().unwrap();
    assert_eq!(arr[0], Object::Name(b"Lab".to_vec()));
    let dict = arr[1].as_dict().unwrap();
    assert!(dict.has(b"WhitePoint"));
    assert!(dict.has(b"Range"));
    assert!(!dict.has(b"BlackPoint"));
}
