use crate::error::Error;

/// A genomic region in the format [contig] or [contig]:[start]-[stop], 1-based and inclusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub contig: String,
    pub range: Option<(u64, u64)>,
}

impl Region {
    pub fn contains(&self, contig: &str, pos: u64) -> bool {
        if self.contig != contig {
            return false;
        }
        match self.range {
            Some((start, stop)) => start <= pos && pos <= stop,
            None => true,
        }
    }
}

impl std::str::FromStr for Region {
    type Err = Error;

    fn from_str(coords: &str) -> Result<Self, Self::Err> {
        let (contig, start, stop) = parse_coords(coords)?;
        Ok(Self {
            contig: contig.to_string(),
            range: start.zip(stop),
        })
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.range {
            Some((start, stop)) => write!(f, "{}:{start}-{stop}", self.contig),
            None => write!(f, "{}", self.contig),
        }
    }
}

// Coords are in the format [contig] or [contig]:[start]-[stop]
pub fn parse_coords(coords: &str) -> Result<(&str, Option<u64>, Option<u64>), Error> {
    let mut coord_split = coords.split(':');

    let contig = match coord_split.next() {
        Some(contig) if !contig.is_empty() => contig,
        _ => return Err(Error::CoordParse { coord: coords.into() }),
    };

    let Some(positions) = coord_split.next() else {
        return Ok((contig, None, None));
    };

    let mut pos_split = positions.split('-');

    match (pos_split.next(), pos_split.next(), pos_split.next()) {
        (Some(start), Some(stop), None) => {
            let start = parse_pos(coords, start)?;
            let stop = parse_pos(coords, stop)?;
            if start > stop {
                return Err(Error::CoordParse { coord: coords.into() });
            }
            Ok((contig, Some(start), Some(stop)))
        }
        _ => Err(Error::CoordParse { coord: coords.into() }),
    }
}

fn parse_pos(coords: &str, value: &str) -> Result<u64, Error> {
    value.parse::<u64>().map_err(|_| Error::PosParse {
        coord: coords.into(),
        value: value.into(),
    })
}

#[cfg(test)]
#[rustfmt::skip]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coord() {
        let (contig, start, stop) = parse_coords("chr9").unwrap();
        assert_eq!(contig, "chr9");
        assert_eq!(start, None);
        assert_eq!(stop, None);

        let res = parse_coords("chr9:1920");
        assert!(res.is_err());

        let (contig, start, stop) = parse_coords("chr9:1920-2500").unwrap();
        assert_eq!(contig, "chr9");
        assert_eq!(start, Some(1920));
        assert_eq!(stop, Some(2500));

        let result = parse_coords("chr9:1920--2500");
        assert!(result.is_err());

        let result = parse_coords("chr9:2500-1920");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_coord_int_parser_error() {
        let err = parse_coords("chr9:foo-10").unwrap_err();
        assert_eq!(err.to_string(), "Position \"foo\" is not an integer in coords chr9:foo-10");
    }

    #[test]
    fn test_region_contains() {
        let region: Region = "chr1:10-20".parse().unwrap();
        assert!(region.contains("chr1", 10));
        assert!(region.contains("chr1", 20));
        assert!(!region.contains("chr1", 21));
        assert!(!region.contains("chr2", 15));
        assert_eq!(region.to_string(), "chr1:10-20");

        let region: Region = "chr2".parse().unwrap();
        assert!(region.contains("chr2", 1));
        assert!(!region.contains("chr1", 1));
    }
}
