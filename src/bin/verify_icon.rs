use image::io::Reader as ImageReader;
use image::Rgba;
use std::process::ExitCode;

const BADGE: [u8; 3] = [0x42, 0x85, 0xF4];

fn main() -> ExitCode {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "grammar-checker/icons/icon128.png".to_string());

    let img = match ImageReader::open(&path).map(|r| r.decode()) {
        Ok(Ok(img)) => img,
        Ok(Err(err)) => {
            eprintln!("Failed to decode {path}: {err}");
            return ExitCode::FAILURE;
        }
        Err(err) => {
            eprintln!("Failed to open {path}: {err}");
            return ExitCode::FAILURE;
        }
    };

    let rgba_img = img.to_rgba8();
    let (width, height) = rgba_img.dimensions();

    println!("Checking icon: {}", path);
    println!("Image dimensions: {}x{} ({:?})", width, height, img.color());

    let mut ok = width == height && width > 0;
    if !ok {
        println!("⚠ Icon is not square");
        return ExitCode::FAILURE;
    }

    let size = width;
    let last = size - 1;

    println!("\nCorner alphas:");
    for (x, y) in [(0, 0), (last, 0), (0, last), (last, last)] {
        let alpha = rgba_img.get_pixel(x, y)[3];
        println!("  ({}, {}): {}", x, y, alpha);
        ok &= alpha == 0;
    }

    let (bx, by) = (size / 2, size / 4);
    let badge = *rgba_img.get_pixel(bx, by);
    let badge_ok = badge[3] == 255
        && badge
            .0
            .iter()
            .zip(BADGE)
            .all(|(&got, want)| got.abs_diff(want) <= 1);
    println!("\nBadge sample (x={}, y={}): {}", bx, by, describe(badge));
    ok &= badge_ok;

    let (cx, cy) = ((size as f32 * 0.45) as u32, (size as f32 * 0.65) as u32);
    let check = *rgba_img.get_pixel(cx, cy);
    let check_ok = check[3] == 255 && check.0[..3].iter().all(|&c| c >= 254);
    println!("Checkmark sample (x={}, y={}): {}", cx, cy, describe(check));
    ok &= check_ok;

    if ok {
        println!("\n✓ Icon looks right!");
        ExitCode::SUCCESS
    } else {
        println!("\n⚠ Icon does not match the expected badge");
        ExitCode::FAILURE
    }
}

fn describe(pixel: Rgba<u8>) -> String {
    format!("RGBA: [{}, {}, {}, {}]", pixel[0], pixel[1], pixel[2], pixel[3])
}
