//! Pipeline regression test
//!
//! Load, resize and save through real files in the regout directory.

use halfsize::io::{IoError, read_tga_file};
use halfsize::transform::TransformError;
use halfsize::{Image, PipelineError, PixelBuffer, PixelDepth, ResizeOptions, ScaleMethod};
use halfsize_test::{RegParams, gradient_buffer, regout_path, tga_bytes, write_test_tga};

fn flag(ok: bool) -> f64 {
    if ok { 1.0 } else { 0.0 }
}

#[test]
fn pipeline_reg() {
    let mut rp = RegParams::new("pipeline");

    // --- Test 1: 2x2 BGRA at scale 1 is written back unchanged ---
    let bgra = PixelBuffer::from_data(
        2,
        2,
        PixelDepth::Bit32,
        vec![10, 20, 30, 255, 40, 50, 60, 128, 70, 80, 90, 0, 100, 110, 120, 64],
    )
    .expect("2x2 buffer");
    let in_path = regout_path("pipeline_identity_in.tga");
    let out_path = regout_path("pipeline_identity_out.tga");
    write_test_tga(&in_path, &bgra).expect("write input");
    let mut image = Image::load(&in_path).expect("load identity");
    rp.compare_values(2.0, image.width() as f64, 0.0);
    rp.compare_values(2.0, image.height() as f64, 0.0);
    rp.compare_values(32.0, image.depth().bits() as f64, 0.0);
    image
        .resize(&ResizeOptions::default().with_scale_factor(1.0))
        .expect("resize identity");
    image.save(&out_path).expect("save identity");
    let written = read_tga_file(&out_path).expect("read identity");
    rp.compare_buffers(&bgra, &written.pixels);
    let in_bytes = std::fs::read(&in_path).expect("input bytes");
    let out_bytes = std::fs::read(&out_path).expect("output bytes");
    rp.compare_strings(&in_bytes, &out_bytes);

    // --- Test 2: default options halve a 4x4 image by sampling ---
    let src = gradient_buffer(4, 4, PixelDepth::Bit24).expect("gradient");
    let mut image = Image::from_bytes(&tga_bytes(&src).expect("bytes")).expect("from bytes");
    image.resize(&ResizeOptions::default()).expect("resize 2x");
    let half = image.resized().expect("resized");
    rp.compare_values(2.0, half.width() as f64, 0.0);
    rp.compare_values(2.0, half.height() as f64, 0.0);
    for (tx, ty, sx, sy) in [(0, 0, 0, 0), (1, 0, 2, 0), (0, 1, 0, 2), (1, 1, 2, 2)] {
        rp.compare_strings(
            src.pixel(sx, sy).unwrap_or_default(),
            half.pixel(tx, ty).unwrap_or_default(),
        );
    }

    // --- Test 3: repeated resize starts from the original ---
    let src = gradient_buffer(12, 8, PixelDepth::Bit32).expect("gradient 32");
    let mut image = Image::from_bytes(&tga_bytes(&src).expect("bytes")).expect("from bytes");
    image.resize(&ResizeOptions::default()).expect("first");
    let first = image.resized().cloned().expect("first result");
    image.resize(&ResizeOptions::default()).expect("second");
    rp.compare_values(6.0, image.resized_width().unwrap_or(0) as f64, 0.0);
    rp.compare_values(4.0, image.resized_height().unwrap_or(0) as f64, 0.0);
    rp.compare_buffers(&first, image.resized().expect("second result"));
    image
        .resize(&ResizeOptions::default().with_scale_factor(4.0))
        .expect("third");
    rp.compare_values(3.0, image.resized_width().unwrap_or(0) as f64, 0.0);
    rp.compare_values(2.0, image.resized_height().unwrap_or(0) as f64, 0.0);

    // --- Test 4: bilinear output through a file ---
    let bl_path = regout_path("pipeline_bilinear.tga");
    image
        .resize(
            &ResizeOptions::default()
                .with_scale_factor(1.5)
                .with_method(ScaleMethod::Bilinear),
        )
        .expect("bilinear");
    image.save(&bl_path).expect("save bilinear");
    let back = read_tga_file(&bl_path).expect("read bilinear");
    rp.compare_values(8.0, back.header.width() as f64, 0.0);
    rp.compare_values(5.0, back.header.height() as f64, 0.0);
    rp.compare_buffers(image.resized().expect("bilinear result"), &back.pixels);

    // --- Test 5: missing input ---
    let missing = Image::load(regout_path("pipeline_missing.tga"));
    rp.compare_values(
        1.0,
        flag(matches!(missing, Err(PipelineError::Io(IoError::Open { .. })))),
        0.0,
    );

    // --- Test 6: truncated payload ---
    let mut bytes = tga_bytes(&src).expect("bytes");
    bytes.truncate(bytes.len() - 1);
    let short_path = regout_path("pipeline_truncated.tga");
    std::fs::write(&short_path, &bytes).expect("write truncated");
    let truncated = Image::load(&short_path);
    rp.compare_values(
        1.0,
        flag(matches!(
            truncated,
            Err(PipelineError::Io(IoError::TruncatedData { .. }))
        )),
        0.0,
    );

    // --- Test 7: save before resize ---
    let fresh = Image::from_bytes(&tga_bytes(&src).expect("bytes")).expect("from bytes");
    let unsaved = fresh.save(regout_path("pipeline_unsaved.tga"));
    rp.compare_values(
        1.0,
        flag(matches!(unsaved, Err(PipelineError::NotResized))),
        0.0,
    );
    rp.compare_values(
        1.0,
        flag(!regout_path("pipeline_unsaved.tga").exists()),
        0.0,
    );

    // --- Test 8: a tiny factor is refused before anything is allocated ---
    let mut tiny = Image::from_bytes(&tga_bytes(&bgra).expect("bytes")).expect("from bytes");
    let huge = tiny.resize(&ResizeOptions::default().with_scale_factor(1.0e-30));
    rp.compare_values(
        1.0,
        flag(matches!(
            huge,
            Err(PipelineError::Transform(TransformError::TargetTooLarge { .. }))
        )),
        0.0,
    );
    rp.compare_values(1.0, flag(tiny.resized().is_none()), 0.0);

    // --- Test 9: a target wider than a TGA allows is refused ---
    let row = gradient_buffer(200, 1, PixelDepth::Bit24).expect("row");
    let mut wide = Image::from_bytes(&tga_bytes(&row).expect("bytes")).expect("from bytes");
    let too_wide = wide.resize(&ResizeOptions::default().with_scale_factor(0.005));
    rp.compare_values(
        1.0,
        flag(matches!(
            too_wide,
            Err(PipelineError::Transform(TransformError::TargetTooLarge { .. }))
        )),
        0.0,
    );
    let wide_path = regout_path("pipeline_wide.tga");
    let _ = std::fs::remove_file(&wide_path);
    let unsaved = wide.save(&wide_path);
    rp.compare_values(
        1.0,
        flag(matches!(unsaved, Err(PipelineError::NotResized))),
        0.0,
    );
    rp.compare_values(1.0, flag(!wide_path.exists()), 0.0);

    assert!(rp.cleanup(), "pipeline regression test failed");
}
