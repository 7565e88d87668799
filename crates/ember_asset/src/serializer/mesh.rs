//! Mesh (de)serialization (`.emsh`, binary container)
//!
//! Layout:
//!
//! ```text
//! [4]  magic "EMSH"
//! [4]  version (u32 LE)
//! [8]  header length (u64 LE)
//! [..] bincode header: submesh/node tables, bounds, block ranges
//! [..] vertex block (raw Vertex structs)
//! [..] index block (raw u32 LE)
//! ```
//!
//! Block offsets in the header are absolute file offsets. Bincode's
//! default fixed-width integer encoding keeps the header length
//! independent of the offset values, so the header is encoded once
//! with placeholder offsets to learn its size and once for real.

use std::fs;
use std::path::Path;

use ember_render::{Aabb, MeshNode, MeshSource, Submesh, Vertex};
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetPayload};
use crate::error::AssetError;

pub const MESH_MAGIC: [u8; 4] = *b"EMSH";
pub const MESH_VERSION: u32 = 1;

const PREAMBLE_LEN: u64 = 4 + 4 + 8;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
struct BlockRange {
    offset: u64,
    size: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct MeshHeader {
    submeshes: Vec<Submesh>,
    nodes: Vec<MeshNode>,
    bounds: Aabb,
    vertex_count: u64,
    index_count: u64,
    vertex_block: BlockRange,
    index_block: BlockRange,
}

pub(super) fn serialize(asset: &Asset, path: &Path) -> Result<u64, AssetError> {
    let mesh = asset
        .as_mesh_source()
        .ok_or(AssetError::UnsupportedType(asset.asset_type()))?;

    let vertex_bytes: &[u8] = bytemuck::cast_slice(&mesh.vertices);
    let index_bytes: &[u8] = bytemuck::cast_slice(&mesh.indices);

    let mut header = MeshHeader {
        submeshes: mesh.submeshes.clone(),
        nodes: mesh.nodes.clone(),
        bounds: mesh.bounds,
        vertex_count: mesh.vertices.len() as u64,
        index_count: mesh.indices.len() as u64,
        vertex_block: BlockRange::default(),
        index_block: BlockRange::default(),
    };

    // First pass fixes the header size, second fills real offsets
    let header_len = bincode::serialized_size(&header)?;
    let blocks_base = PREAMBLE_LEN + header_len;
    header.vertex_block = BlockRange {
        offset: blocks_base,
        size: vertex_bytes.len() as u64,
    };
    header.index_block = BlockRange {
        offset: blocks_base + vertex_bytes.len() as u64,
        size: index_bytes.len() as u64,
    };
    let header_bytes = bincode::serialize(&header)?;
    debug_assert_eq!(header_bytes.len() as u64, header_len);

    let mut out =
        Vec::with_capacity((blocks_base as usize) + vertex_bytes.len() + index_bytes.len());
    out.extend_from_slice(&MESH_MAGIC);
    out.extend_from_slice(&MESH_VERSION.to_le_bytes());
    out.extend_from_slice(&header_len.to_le_bytes());
    out.extend_from_slice(&header_bytes);
    out.extend_from_slice(vertex_bytes);
    out.extend_from_slice(index_bytes);

    super::ensure_parent_dir(path)?;
    fs::write(path, &out)?;
    Ok(out.len() as u64)
}

pub(super) fn deserialize(path: &Path) -> Result<AssetPayload, AssetError> {
    let bytes = fs::read(path)?;
    let corrupt = |reason: &str| AssetError::Corrupt {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if bytes.len() < PREAMBLE_LEN as usize {
        return Err(corrupt("file shorter than preamble"));
    }
    if bytes[0..4] != MESH_MAGIC {
        return Err(corrupt("bad magic"));
    }
    let version = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    if version != MESH_VERSION {
        return Err(corrupt(&format!("unsupported version {version}")));
    }
    let header_len = u64::from_le_bytes(bytes[8..16].try_into().unwrap()) as usize;

    let header_end = (PREAMBLE_LEN as usize)
        .checked_add(header_len)
        .filter(|&end| end <= bytes.len())
        .ok_or_else(|| corrupt("header length out of range"))?;
    let header: MeshHeader = bincode::deserialize(&bytes[PREAMBLE_LEN as usize..header_end])?;

    let vertices = read_block::<Vertex>(&bytes, header.vertex_block, header.vertex_count)
        .ok_or_else(|| corrupt("vertex block out of range"))?;
    let index_bytes = block_slice(&bytes, header.index_block)
        .ok_or_else(|| corrupt("index block out of range"))?;
    if header.index_count.checked_mul(4) != Some(header.index_block.size) {
        return Err(corrupt("index block size mismatch"));
    }
    let indices: Vec<u32> = index_bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes(c.try_into().unwrap()))
        .collect();

    Ok(AssetPayload::MeshSource(MeshSource {
        vertices,
        indices,
        submeshes: header.submeshes,
        nodes: header.nodes,
        bounds: header.bounds,
    }))
}

fn block_slice(bytes: &[u8], block: BlockRange) -> Option<&[u8]> {
    let start = usize::try_from(block.offset).ok()?;
    let end = start.checked_add(usize::try_from(block.size).ok()?)?;
    bytes.get(start..end)
}

/// Decode a raw block of Pod structs; file blocks carry no alignment
/// guarantees, so each element is read unaligned.
fn read_block<T: bytemuck::Pod>(bytes: &[u8], block: BlockRange, count: u64) -> Option<Vec<T>> {
    let elem = std::mem::size_of::<T>() as u64;
    if count.checked_mul(elem) != Some(block.size) {
        return None;
    }
    let slice = block_slice(bytes, block)?;
    Some(
        slice
            .chunks_exact(elem as usize)
            .map(bytemuck::pod_read_unaligned)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::AssetHandle;

    #[test]
    fn test_mesh_container_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sphere.emsh");

        let mesh = MeshSource::uv_sphere(1.0, 12, 6);
        let asset = Asset::new(AssetHandle::new(1), AssetPayload::MeshSource(mesh.clone()));

        let written = serialize(&asset, &path).unwrap();
        assert_eq!(written, fs::metadata(&path).unwrap().len());

        match deserialize(&path).unwrap() {
            AssetPayload::MeshSource(back) => {
                assert_eq!(back.vertices, mesh.vertices);
                assert_eq!(back.indices, mesh.indices);
                assert_eq!(back.submeshes, mesh.submeshes);
                assert_eq!(back.nodes, mesh.nodes);
                assert_eq!(back.bounds, mesh.bounds);
            }
            other => panic!("expected mesh, got {:?}", other.asset_type()),
        }
    }

    #[test]
    fn test_empty_mesh_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.emsh");
        let asset = Asset::new(
            AssetHandle::new(1),
            AssetPayload::MeshSource(MeshSource::default()),
        );
        serialize(&asset, &path).unwrap();

        match deserialize(&path).unwrap() {
            AssetPayload::MeshSource(back) => assert!(back.is_empty()),
            other => panic!("expected mesh, got {:?}", other.asset_type()),
        }
    }

    #[test]
    fn test_bad_magic_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.emsh");
        fs::write(&path, b"NOPE\0\0\0\0\0\0\0\0\0\0\0\0").unwrap();
        assert!(matches!(
            deserialize(&path),
            Err(AssetError::Corrupt { .. })
        ));
    }

    #[test]
    fn test_truncated_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trunc.emsh");

        let mesh = MeshSource::uv_sphere(1.0, 8, 4);
        let asset = Asset::new(AssetHandle::new(1), AssetPayload::MeshSource(mesh));
        serialize(&asset, &path).unwrap();

        let bytes = fs::read(&path).unwrap();
        fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
        assert!(deserialize(&path).is_err());
    }

    #[test]
    fn test_wrong_version_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("v9.emsh");

        let mut out = Vec::new();
        out.extend_from_slice(&MESH_MAGIC);
        out.extend_from_slice(&9u32.to_le_bytes());
        out.extend_from_slice(&0u64.to_le_bytes());
        fs::write(&path, &out).unwrap();
        assert!(matches!(
            deserialize(&path),
            Err(AssetError::Corrupt { .. })
        ));
    }
}
