//! 読み込み中に表示するシマー画像（SVGのData URL）

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

fn shimmer_svg(width: u32, height: u32) -> String {
    format!(
        r##"<svg width="{w}" height="{h}" version="1.1" xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink">
  <defs>
    <linearGradient id="g" x1="0%" y1="0%" x2="100%" y2="0%">
      <stop offset="0%" stop-color="#f3f4f6" stop-opacity="1">
        <animate attributeName="offset" values="-2; 1" dur="2s" repeatCount="indefinite" />
      </stop>
      <stop offset="50%" stop-color="#eaecee" stop-opacity="1">
        <animate attributeName="offset" values="-1; 2" dur="2s" repeatCount="indefinite" />
      </stop>
      <stop offset="100%" stop-color="#f3f4f6" stop-opacity="1">
        <animate attributeName="offset" values="0; 3" dur="2s" repeatCount="indefinite" />
      </stop>
    </linearGradient>
  </defs>
  <rect width="{w}" height="{h}" fill="#f3f4f6" />
  <rect width="{w}" height="{h}" fill="url(#g)" />
</svg>"##,
        w = width,
        h = height
    )
}

/// プレースホルダーのData URL
pub fn image_placeholder(width: u32, height: u32) -> String {
    format!(
        "data:image/svg+xml;base64,{}",
        STANDARD.encode(shimmer_svg(width, height))
    )
}
