//! Grid and sector index math.
//!
//! Convention: the x axis is latitude, the y axis is longitude, matching the
//! hash seed order. Cell indexing floors toward negative infinity so the
//! southern/western hemispheres tile exactly like the northern/eastern ones;
//! all divisions on indices use `div_euclid` for the same reason.

use crate::geo::EARTH_RADIUS_M;

/// Meters spanned by one degree of latitude (and of longitude at the
/// equator), derived from the same Earth radius the distance helpers use.
pub const METERS_PER_DEG: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Index of the grid cell containing `deg` at the given cell resolution.
pub fn cell_index(deg: f64, cell_size_deg: f64) -> i32 {
    (deg / cell_size_deg).floor() as i32
}

/// Index of the sector containing a cell.
pub fn sector_of_cell(cell: i32, sector_cells: i32) -> i32 {
    cell.div_euclid(sector_cells)
}

/// Sector containing a raw lat/lng point.
pub fn sector_at(lat: f64, lng: f64, cell_size_deg: f64, sector_cells: i32) -> (i32, i32) {
    (
        sector_of_cell(cell_index(lat, cell_size_deg), sector_cells),
        sector_of_cell(cell_index(lng, cell_size_deg), sector_cells),
    )
}

/// Center of a cell, in degrees.
pub fn cell_center_deg(cell: i32, cell_size_deg: f64) -> f64 {
    (cell as f64 + 0.5) * cell_size_deg
}

/// Sector edge length in degrees.
pub fn sector_edge_deg(cell_size_deg: f64, sector_cells: i32) -> f64 {
    cell_size_deg * sector_cells as f64
}

/// Sector edge length in meters (nominal, at the equator).
pub fn sector_edge_m(cell_size_deg: f64, sector_cells: i32) -> f64 {
    sector_edge_deg(cell_size_deg, sector_cells) * METERS_PER_DEG
}

/// Geometric center of a sector on one axis, in degrees.
pub fn sector_center_deg(sector: i32, cell_size_deg: f64, sector_cells: i32) -> f64 {
    (sector as f64 + 0.5) * sector_edge_deg(cell_size_deg, sector_cells)
}

/// Center coordinates of a sub-cell within a sector.
///
/// `subcell` indexes the sector's cells row-major in `0..sector_cells²`.
/// Returns `(lat, lng)` of the cell center.
pub fn subcell_center(
    sector_x: i32,
    sector_y: i32,
    subcell: i32,
    cell_size_deg: f64,
    sector_cells: i32,
) -> (f64, f64) {
    let local_x = subcell % sector_cells;
    let local_y = subcell / sector_cells;
    let abs_x = sector_x * sector_cells + local_x;
    let abs_y = sector_y * sector_cells + local_y;
    (
        cell_center_deg(abs_x, cell_size_deg),
        cell_center_deg(abs_y, cell_size_deg),
    )
}

/// Hour bucket for a unix timestamp in seconds.
pub fn hour_bucket(unix_seconds: i64) -> i32 {
    unix_seconds.div_euclid(3600) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_index_floors() {
        assert_eq!(cell_index(10.310_51, 0.0001), 103_105);
        assert_eq!(cell_index(0.0, 0.0001), 0);
        assert_eq!(cell_index(0.000_05, 0.0001), 0);
    }

    #[test]
    fn cell_index_floors_toward_negative_infinity() {
        assert_eq!(cell_index(-0.000_05, 0.0001), -1);
        assert_eq!(cell_index(-0.000_15, 0.0001), -2);
    }

    #[test]
    fn sector_of_cell_uses_floor_division() {
        assert_eq!(sector_of_cell(0, 20), 0);
        assert_eq!(sector_of_cell(19, 20), 0);
        assert_eq!(sector_of_cell(20, 20), 1);
        assert_eq!(sector_of_cell(-1, 20), -1);
        assert_eq!(sector_of_cell(-20, 20), -1);
        assert_eq!(sector_of_cell(-21, 20), -2);
    }

    #[test]
    fn sector_edge_is_about_220_m() {
        let edge = sector_edge_m(0.0001, 20);
        assert!((218.0..226.0).contains(&edge), "edge = {edge} m");
    }

    #[test]
    fn sector_center_sits_mid_sector() {
        // Sector 0 spans [0, 0.002)°, center at 0.001.
        let c = sector_center_deg(0, 0.0001, 20);
        assert!((c - 0.001).abs() < 1e-12);
        let c5 = sector_center_deg(5, 0.0001, 20);
        assert!((c5 - 0.011).abs() < 1e-12);
    }

    #[test]
    fn subcell_centers_stay_inside_their_sector() {
        for subcell in 0..400 {
            let (lat, lng) = subcell_center(5, 7, subcell, 0.0001, 20);
            assert_eq!(
                sector_at(lat, lng, 0.0001, 20),
                (5, 7),
                "subcell {subcell} escaped its sector: ({lat}, {lng})"
            );
        }
    }

    #[test]
    fn subcell_centers_work_in_negative_sectors() {
        for subcell in [0, 19, 200, 399] {
            let (lat, lng) = subcell_center(-3, -11, subcell, 0.0001, 20);
            assert_eq!(sector_at(lat, lng, 0.0001, 20), (-3, -11));
        }
    }

    #[test]
    fn hour_bucket_boundaries() {
        assert_eq!(hour_bucket(0), 0);
        assert_eq!(hour_bucket(3_599), 0);
        assert_eq!(hour_bucket(3_600), 1);
        assert_eq!(hour_bucket(-1), -1);
        assert_eq!(hour_bucket(1_766_000_000), 490_555);
    }
}
