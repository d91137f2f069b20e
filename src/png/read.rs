use super::*;
use crate::MediaError;

/// Where the reader is relative to the run of `IDAT` chunks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdatRun {
  NotStarted,
  Running,
  Finished,
}

/// Reads the signature and every chunk of a PNG, using the default limits.
pub fn png_read(stream: &mut Stream<'_>) -> MediaResult<PngContext> {
  png_read_with_limits(stream, &DecodeLimits::default())
}

/// Reads the signature and every chunk of a PNG, up to `IEND`.
///
/// Chunks are checked against their CRC and against the chunk ordering
/// rules:
/// * `IHDR` comes first and only once.
/// * `PLTE` comes at most once, before any `IDAT`, and never in a grayscale
///   image.
/// * All the `IDAT` chunks are next to each other, and there's at least one.
/// * At most [`PNG_TEXT_CHUNK_CAPACITY`] `iTXt` chunks, and at most that many
///   `tEXt` chunks.
/// * `tRNS`, `cHRM`, `gAMA`, `sRGB`, `iCCP`, `eXIf`, and `tIME` come at most
///   once each.
///
/// Chunks of other types are skipped. The pixel data is gathered into
/// [`PngContext::image_data`] but never inflated.
///
/// ## Failure
/// * A bad signature, a CRC mismatch, a broken chunk, an invalid header, or a
///   chunk out of order is a format error.
/// * Running out of data before `IEND` is a format error.
pub fn png_read_with_limits(stream: &mut Stream<'_>, limits: &DecodeLimits) -> MediaResult<PngContext> {
  png_read_inner(stream, limits).map_err(|e| {
    log::warn!("PNG read failed: {e}");
    e
  })
}

fn png_read_inner(stream: &mut Stream<'_>, limits: &DecodeLimits) -> MediaResult<PngContext> {
  stream.set_cursor_position(0)?;
  let signature = stream.read_array::<8>()?;
  if signature != PNG_SIGNATURE {
    return Err(MediaError::format("invalid PNG signature"));
  }

  let mut ctx = PngContext::default();
  let mut idat = IdatRun::NotStarted;
  let mut seen_once: Vec<PngChunkType> = Vec::new();
  loop {
    let Some(chunk) = png_read_chunk(stream, limits)? else {
      return Err(MediaError::format("PNG ended without an IEND chunk"));
    };
    ctx.chunk_count += 1;
    let ty = chunk.chunk_type;
    log::debug!("{ty} chunk, {} bytes", chunk.data.len());

    let Some(header) = ctx.header else {
      match ty {
        PngChunkType::IHDR => {
          let header = PngHeader::try_from(chunk.data.as_slice())?;
          log::trace!("{header:?}");
          if !header.is_valid() {
            return Err(MediaError::format(format!("invalid IHDR {header:?}")));
          }
          limits.check_dimensions(header.width, header.height)?;
          ctx.header = Some(header);
          continue;
        }
        PngChunkType::IEND => return Err(MediaError::format("IEND before IHDR")),
        other => return Err(MediaError::format(format!("the first chunk must be IHDR, found {other}"))),
      }
    };

    if idat == IdatRun::Running && ty != PngChunkType::IDAT {
      idat = IdatRun::Finished;
    }
    match ty {
      PngChunkType::IHDR => return Err(MediaError::format("more than one IHDR chunk")),
      PngChunkType::IEND => {
        if idat == IdatRun::NotStarted {
          return Err(MediaError::format("IEND before any IDAT"));
        }
        return Ok(ctx);
      }
      PngChunkType::IDAT => {
        if idat == IdatRun::Finished {
          return Err(MediaError::format("IDAT chunks are not contiguous"));
        }
        idat = IdatRun::Running;
        ctx.image_data.try_reserve(chunk.data.len())?;
        ctx.image_data.extend_from_slice(&chunk.data);
      }
      PngChunkType::PLTE => {
        if ctx.palette.is_some() {
          return Err(MediaError::format("more than one PLTE chunk"));
        }
        if idat != IdatRun::NotStarted {
          return Err(MediaError::format("PLTE after IDAT"));
        }
        if matches!(header.color_type(), Some(PngColorType::Grayscale | PngColorType::GrayscaleAlpha)) {
          return Err(MediaError::format("PLTE in a grayscale image"));
        }
        let palette = PngPalette::parse(&chunk.data, &header)?;
        log::trace!("{palette:?}");
        ctx.palette = Some(palette);
      }
      PngChunkType::tEXt | PngChunkType::iTXt => {
        let international = ty == PngChunkType::iTXt;
        let count = ctx.text_chunks.iter().filter(|t| t.is_international == international).count();
        if count >= PNG_TEXT_CHUNK_CAPACITY {
          return Err(MediaError::format(format!("more than {PNG_TEXT_CHUNK_CAPACITY} {ty} chunks")));
        }
        let text = if ty == PngChunkType::tEXt {
          PngTextChunk::parse_text(&chunk.data)?
        } else {
          PngTextChunk::parse_international(&chunk.data)?
        };
        log::trace!("{text:?}");
        ctx.text_chunks.push(text);
      }
      PngChunkType::tRNS
      | PngChunkType::cHRM
      | PngChunkType::gAMA
      | PngChunkType::sRGB
      | PngChunkType::iCCP
      | PngChunkType::eXIf
      | PngChunkType::tIME => {
        if seen_once.contains(&ty) {
          return Err(MediaError::format(format!("more than one {ty} chunk")));
        }
        seen_once.push(ty);
        read_ancillary(&mut ctx, &header, &chunk)?;
      }
      other => log::debug!("skipping {other} chunk"),
    }
  }
}

fn read_ancillary(ctx: &mut PngContext, header: &PngHeader, chunk: &PngRawChunk) -> MediaResult<()> {
  let data = chunk.data.as_slice();
  match chunk.chunk_type {
    PngChunkType::tRNS => {
      ctx.transparency = Some(PngTransparency::parse(data, header, ctx.palette.as_ref())?);
    }
    PngChunkType::cHRM => ctx.chromaticity = Some(PngChromaticity::try_from(data)?),
    PngChunkType::gAMA => ctx.gamma = png_parse_gamma(data)?,
    PngChunkType::sRGB => ctx.srgb_intent = Some(png_parse_srgb(data)?),
    PngChunkType::iCCP => ctx.icc_profile = Some(PngIccProfile::try_from(data)?),
    PngChunkType::eXIf => ctx.exif = Some(png_parse_exif(data)?),
    PngChunkType::tIME => ctx.time = Some(PngTime::try_from(data)?),
    _ => (),
  }
  Ok(())
}
