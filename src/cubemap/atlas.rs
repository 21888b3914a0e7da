//! Composing faces into an atlas and splitting an atlas back into faces.

use crate::raster::Image;

use super::{CubemapError, FaceId, FaceLayout};

/// The six faces of a cubemap, addressable by [`FaceId`].
///
/// All faces share the same square size and channel count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CubeFaces {
    faces: [Image; 6],
}

impl CubeFaces {
    /// Returns the image for `face`.
    pub fn face(&self, face: FaceId) -> &Image {
        &self.faces[face.index()]
    }

    /// Iterates over `(face, image)` pairs in face order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Image)> {
        FaceId::all().into_iter().zip(self.faces.iter())
    }

    /// Side length of every face in pixels.
    pub fn side_length(&self) -> u32 {
        self.faces[0].width()
    }

    pub fn channels(&self) -> u8 {
        self.faces[0].channels()
    }

    /// Packs the faces into an atlas using `layout`.
    pub fn compose(&self, layout: FaceLayout) -> Result<Image, CubemapError> {
        compose(layout, &self.faces)
    }

    /// Returns the faces in face order.
    pub fn into_vec(self) -> Vec<Image> {
        self.faces.into()
    }
}

impl TryFrom<Vec<Image>> for CubeFaces {
    type Error = CubemapError;

    /// Checks the same preconditions as [`compose`].
    fn try_from(faces: Vec<Image>) -> Result<Self, Self::Error> {
        check_faces(&faces)?;
        let faces: [Image; 6] = faces
            .try_into()
            .map_err(|rest: Vec<Image>| CubemapError::WrongFaceCount(rest.len()))?;
        Ok(Self { faces })
    }
}

/// Builds an atlas from six faces ordered `+x, -x, +y, -y, +z, -z`.
///
/// Every face is copied verbatim to its offset in `layout`; cells not
/// occupied by a face stay zero. Inputs are validated before the atlas is
/// allocated.
pub fn compose(layout: FaceLayout, faces: &[Image]) -> Result<Image, CubemapError> {
    let side = check_faces(faces)?;
    let channels = faces[0].channels();

    let (width, height) = layout.atlas_size(side)?;
    let mut atlas = Image::new(width, height, channels)?;
    for (face, img) in FaceId::all().into_iter().zip(faces) {
        let (x, y) = layout.offset_for(face, side)?;
        atlas.copy_from(img, x, y)?;
    }

    log::debug!(
        "composed {} atlas {}x{} from faces of {}px",
        layout,
        width,
        height,
        side
    );
    Ok(atlas)
}

/// Splits a 6:1 strip atlas into its six faces.
///
/// Only the [`FaceLayout::Strip`] arrangement is recognised.
pub fn split(atlas: &Image) -> Result<CubeFaces, CubemapError> {
    let (width, height) = atlas.dimensions();
    if width % 6 != 0 {
        return Err(CubemapError::InvalidAspectRatio(width));
    }
    let side = width / 6;
    if side != height {
        return Err(CubemapError::NonSquareFace {
            side_from_width: side,
            side_from_height: height,
        });
    }

    let faces = FaceId::all()
        .into_iter()
        .map(|face| {
            let (x, y) = FaceLayout::Strip.offset_for(face, side)?;
            Ok(atlas.crop(x, y, side, side)?)
        })
        .collect::<Result<Vec<_>, CubemapError>>()?;

    CubeFaces::try_from(faces)
}

/// Validates face count, uniform size and channels, and squareness.
///
/// Returns the common side length.
fn check_faces(faces: &[Image]) -> Result<u32, CubemapError> {
    if faces.len() != 6 {
        return Err(CubemapError::WrongFaceCount(faces.len()));
    }

    let first = &faces[0];
    for (face, img) in FaceId::all().into_iter().zip(faces).skip(1) {
        if img.dimensions() != first.dimensions() || img.channels() != first.channels() {
            return Err(CubemapError::FaceMismatch {
                face,
                width: first.width(),
                height: first.height(),
                channels: first.channels(),
                actual_width: img.width(),
                actual_height: img.height(),
                actual_channels: img.channels(),
            });
        }
    }

    if first.width() != first.height() {
        return Err(CubemapError::FaceNotSquare(first.width(), first.height()));
    }
    Ok(first.width())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Face `i` is filled with a pattern unique to the face and position.
    fn make_faces(side: u32, channels: u8) -> Vec<Image> {
        (0..6u32)
            .map(|i| {
                Image::from_fn(side, side, channels, |x, y| {
                    [(i * 40) as u8, x as u8, y as u8, 255 - i as u8]
                })
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_compose_strip() {
        let faces = make_faces(4, 3);
        let atlas = compose(FaceLayout::Strip, &faces).unwrap();
        assert_eq!(atlas.dimensions(), (24, 4));
        assert_eq!(atlas.channels(), 3);

        for (i, face) in faces.iter().enumerate() {
            let x0 = i as u32 * 4;
            assert_eq!(atlas.pixel(x0, 0), face.pixel(0, 0));
            assert_eq!(atlas.pixel(x0 + 3, 2), face.pixel(3, 2));
        }
    }

    #[test]
    fn test_compose_cross_leaves_empty_cells_zero() {
        let faces = make_faces(2, 4);
        let atlas = compose(FaceLayout::Cross, &faces).unwrap();
        assert_eq!(atlas.dimensions(), (8, 6));

        // +z sits in the top-left cell, -z below the -y cell.
        assert_eq!(atlas.pixel(1, 1), faces[FaceId::PosZ.index()].pixel(1, 1));
        assert_eq!(atlas.pixel(0, 4), faces[FaceId::NegZ.index()].pixel(0, 0));
        assert_eq!(atlas.pixel(6, 2), faces[FaceId::NegX.index()].pixel(0, 0));

        // Unoccupied cell (column 3, row 0).
        assert_eq!(atlas.pixel(6, 0), &[0, 0, 0, 0]);
    }

    #[test]
    fn test_compose_does_not_modify_inputs() {
        let faces = make_faces(3, 3);
        let before = faces.clone();
        let _ = compose(FaceLayout::Cross, &faces).unwrap();
        assert_eq!(faces, before);
    }

    #[test]
    fn test_compose_wrong_count() {
        let mut faces = make_faces(2, 3);
        faces.pop();
        let err = compose(FaceLayout::Strip, &faces).unwrap_err();
        assert_eq!(err, CubemapError::WrongFaceCount(5));
        assert!(err.is_precondition_violation());

        let mut faces = make_faces(2, 3);
        faces.push(faces[0].clone());
        assert_eq!(
            compose(FaceLayout::Strip, &faces),
            Err(CubemapError::WrongFaceCount(7))
        );
    }

    #[test]
    fn test_compose_mismatched_face() {
        let mut faces = make_faces(4, 3);
        faces[3] = Image::new(5, 5, 3).unwrap();
        let err = compose(FaceLayout::Strip, &faces).unwrap_err();
        assert!(matches!(err, CubemapError::FaceMismatch { face: FaceId::NegY, .. }));
        assert!(err.is_precondition_violation());
    }

    #[test]
    fn test_compose_channel_mismatch() {
        let mut faces = make_faces(4, 3);
        faces[5] = Image::new(4, 4, 4).unwrap();
        let err = compose(FaceLayout::Cross, &faces).unwrap_err();
        assert!(matches!(err, CubemapError::FaceMismatch { face: FaceId::NegZ, .. }));
    }

    #[test]
    fn test_compose_non_square() {
        let faces: Vec<_> = (0..6).map(|_| Image::new(4, 3, 3).unwrap()).collect();
        let err = compose(FaceLayout::Strip, &faces).unwrap_err();
        assert_eq!(err, CubemapError::FaceNotSquare(4, 3));
        assert!(err.is_precondition_violation());
    }

    #[test]
    fn test_split_roundtrip() {
        let faces = make_faces(5, 3);
        let atlas = compose(FaceLayout::Strip, &faces).unwrap();
        let split_faces = split(&atlas).unwrap();

        assert_eq!(split_faces.side_length(), 5);
        for (face, img) in split_faces.iter() {
            assert_eq!(img, &faces[face.index()], "face {}", face);
        }
        assert_eq!(split_faces.into_vec(), faces);
    }

    #[test]
    fn test_split_invalid_aspect_ratio() {
        let atlas = Image::new(25, 4, 3).unwrap();
        assert_eq!(split(&atlas), Err(CubemapError::InvalidAspectRatio(25)));
    }

    #[test]
    fn test_split_non_square_face() {
        let atlas = Image::new(24, 5, 3).unwrap();
        assert_eq!(
            split(&atlas),
            Err(CubemapError::NonSquareFace {
                side_from_width: 4,
                side_from_height: 5
            })
        );
    }

    #[test]
    fn test_split_rejects_cross_atlas() {
        let atlas = compose(FaceLayout::Cross, &make_faces(4, 3)).unwrap();
        // 16x12: width is not a multiple of 6.
        assert!(matches!(split(&atlas), Err(CubemapError::InvalidAspectRatio(16))));
    }

    #[test]
    fn test_cube_faces_try_from() {
        let faces = CubeFaces::try_from(make_faces(3, 1)).unwrap();
        assert_eq!(faces.face(FaceId::PosY).pixel(0, 0), &[80]);
        assert_eq!(faces.channels(), 1);

        let atlas = faces.compose(FaceLayout::Strip).unwrap();
        assert_eq!(split(&atlas).unwrap(), faces);

        assert!(CubeFaces::try_from(make_faces(3, 1)[..4].to_vec()).is_err());
    }
}
