use terranav::terrain::constants::MAX_GRID_DIMENSION;
use terranav::{GridCoord, TerrainError, TerrainResult};

/// Generic parser for delimited strings that return fixed-size arrays
pub fn parse_delimited<T, E, const N: usize>(
    input: &str,
    delimiter: char,
    type_name: &str,
    parser: impl Fn(&str) -> Result<T, E>,
) -> TerrainResult<[T; N]>
where
    T: Copy + Default,
{
    let parts: Vec<&str> = input.split(delimiter).map(str::trim).collect();
    if parts.len() != N {
        return Err(TerrainError::ValidationFailed {
            reason: format!(
                "Invalid {type_name} format '{input}'. Expected {N} {delimiter}-separated values"
            ),
        });
    }

    let mut result = [T::default(); N];
    for (i, part) in parts.iter().enumerate() {
        result[i] = parser(part).map_err(|_| TerrainError::ValidationFailed {
            reason: format!("Invalid {type_name} value: '{part}'"),
        })?;
    }

    Ok(result)
}

/// Parse size string "WIDTHxHEIGHT" with validation
pub fn parse_size(size_str: &str) -> TerrainResult<(u32, u32)> {
    let [width, height] = parse_delimited::<u32, _, 2>(size_str, 'x', "size", |s| s.parse())?;

    if width == 0 || height == 0 || width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        return Err(TerrainError::InvalidDimensions {
            width: width as i64,
            height: height as i64,
        });
    }

    Ok((width, height))
}

/// Parse grid coordinate string "X,Y"
pub fn parse_coord(coord_str: &str) -> TerrainResult<GridCoord> {
    let [x, y] = parse_delimited::<i32, _, 2>(coord_str, ',', "coordinate", |s| s.parse())?;
    Ok(GridCoord::new(x, y))
}

/// Render a path as "(x, y) -> (x, y) -> ..."
pub fn format_path(start: GridCoord, path: &[GridCoord]) -> String {
    std::iter::once(start)
        .chain(path.iter().copied())
        .map(|coord| coord.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64x64").unwrap(), (64, 64));
        assert_eq!(parse_size("128x256").unwrap(), (128, 256));
        assert_eq!(parse_size("1x1").unwrap(), (1, 1));

        assert!(parse_size("64").is_err());
        assert!(parse_size("0x64").is_err());
        assert!(parse_size("3000x64").is_err());
        assert!(parse_size("12.5x3").is_err());
    }

    #[test]
    fn test_parse_coord() {
        assert_eq!(parse_coord("3,4").unwrap(), GridCoord::new(3, 4));
        assert_eq!(parse_coord(" 0, 7 ").unwrap(), GridCoord::new(0, 7));
        assert_eq!(parse_coord("-1,2").unwrap(), GridCoord::new(-1, 2));

        assert!(parse_coord("3").is_err());
        assert!(parse_coord("a,b").is_err());
        assert!(parse_coord("1,2,3").is_err());
    }

    #[test]
    fn test_format_path() {
        let path = [GridCoord::new(1, 1), GridCoord::new(2, 2)];
        assert_eq!(format_path(GridCoord::new(0, 0), &path), "(0, 0) -> (1, 1) -> (2, 2)");
    }
}
