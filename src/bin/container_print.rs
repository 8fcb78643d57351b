use rastermeta::{
  bmp::{Bmp, BmpCompression},
  png::{PngReadOptions, RawPngChunkIter},
  ImageKind,
};

use std::path::Path;

fn main() {
  let mut args = std::env::args_os().skip(1).peekable();
  if args.peek().is_none() {
    println!("usage: container_print FILE...");
    return;
  }
  for path in args {
    let path = Path::new(&path);
    println!("== {}", path.display());
    let bytes = match std::fs::read(path) {
      Ok(bytes) => bytes,
      Err(e) => {
        println!("Error reading file: {e:?}");
        continue;
      }
    };
    match ImageKind::detect(&bytes) {
      Some(ImageKind::Png) => print_png(&bytes),
      Some(ImageKind::Bmp) => print_bmp(&bytes),
      None => println!("not a PNG or BMP"),
    }
  }
}

fn print_png(bytes: &[u8]) {
  let it = match RawPngChunkIter::from_png_bytes(bytes) {
    Ok(it) => it,
    Err(e) => {
      println!("{e}");
      return;
    }
  };
  for raw in it {
    match raw {
      Ok(raw) => println!(
        "{} len={} crc={:08X}{}",
        raw.ty,
        raw.data.len(),
        raw.declared_crc,
        if raw.crc_matches() { "" } else { " (BAD CRC)" }
      ),
      Err(e) => println!("{e}"),
    }
  }
  match rastermeta::png::Png::parse_with(bytes, PngReadOptions::lossless()) {
    Ok(png) => {
      if let Some(ihdr) = png.ihdr() {
        println!("{ihdr:?}");
      }
      println!("resolution: {:?}", png.resolution());
      println!("compressed image data: {} bytes", png.image_data().len());
    }
    Err(e) => println!("parse failed: {e}"),
  }
}

fn print_bmp(bytes: &[u8]) {
  let bmp = match Bmp::parse(bytes) {
    Ok(bmp) => bmp,
    Err(e) => {
      println!("parse failed: {e}");
      return;
    }
  };
  println!("{:?}", bmp.file_header());
  println!("{:?}", bmp.info_header());
  if let Ok(c) = bmp.info_header().compression() {
    println!("compression: {:?}", BmpCompression::try_from(c));
  }
  if let Some(table) = bmp.color_table() {
    println!("color table: {} entries", table.len());
  }
  println!("pixel data: {} bytes", bmp.pixel_data().len());
  println!("resolution: {:?}", bmp.resolution());
  match bmp.validate() {
    Ok(()) => println!("valid"),
    Err(e) => println!("invalid: {e}"),
  }
}
