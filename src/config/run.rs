use std::fmt;
use std::fs;
use std::path::PathBuf;

use log::{debug, info};

use crate::compression::CompressionFactory;
use crate::errors::{GrabError, GrabResult};
use crate::export::{ExportFormat, ExportSettings};
use crate::geometry::{BoundingBox, CoordinateSystem, Point, RegionOfInterest};
use crate::selection::{GroupingKey, RankingMetric, SelectionPolicy};

/// How the selected composites of a month are exported
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Layer all selected composites into one image, best on top
    Mosaic,
    /// Export every selected composite on its own
    PerComposite,
}

impl OutputMode {
    pub fn name(&self) -> &'static str {
        match self {
            OutputMode::Mosaic => "mosaic",
            OutputMode::PerComposite => "per_composite",
        }
    }

    pub fn from_name(name: &str) -> GrabResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "mosaic" => Ok(OutputMode::Mosaic),
            "per_composite" | "composites" => Ok(OutputMode::PerComposite),
            other => Err(GrabError::ConfigError(format!(
                "Unknown output mode '{}' (expected mosaic or per_composite)", other))),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Where the region of interest comes from
#[derive(Debug, Clone, PartialEq)]
pub enum RegionSource {
    /// Points buffered into squares of `buffer_meters` radius
    Points { points: Vec<Point>, buffer_meters: f64 },
    /// Ready-made rectangles
    Rectangles(Vec<BoundingBox>),
}

/// Validated settings of one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub year: i32,
    pub months: Vec<u32>,
    /// First part of every output name
    pub output_prefix: String,
    pub region: RegionSource,
    pub region_crs: CoordinateSystem,
    pub grouping: GroupingKey,
    pub ranking: RankingMetric,
    /// `None` keeps every group
    pub max_composites: Option<usize>,
    pub max_cloud_percentage: Option<f64>,
    pub output_mode: OutputMode,
    pub split_quadrants: bool,
    pub export: ExportSettings,
    /// Directory the local backend writes into
    pub destination: PathBuf,
    pub quicklook: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            year: 2019,
            months: vec![6],
            output_prefix: "RGB".to_string(),
            region: RegionSource::Points { points: Vec::new(), buffer_meters: 1000.0 },
            region_crs: CoordinateSystem::WGS84,
            grouping: GroupingKey::MgrsTile,
            ranking: RankingMetric::BestSceneCloud,
            max_composites: None,
            max_cloud_percentage: None,
            output_mode: OutputMode::Mosaic,
            split_quadrants: true,
            export: ExportSettings::default(),
            destination: PathBuf::from("exports"),
            quicklook: false,
        }
    }
}

impl RunConfig {
    /// Read and validate a configuration file
    pub fn from_file(path: &str) -> GrabResult<Self> {
        let content = fs::read_to_string(path)?;
        let config = Self::from_toml(&content)?;
        info!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// Parse and validate a configuration from a TOML string
    pub fn from_toml(content: &str) -> GrabResult<Self> {
        let toml_value: toml::Value = content.parse()
            .map_err(|e| GrabError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        let mut config = RunConfig::default();

        if let Some(run) = table(&toml_value, "run")? {
            config.parse_run(run)?;
        }
        if let Some(region) = table(&toml_value, "region")? {
            config.parse_region(region)?;
        }
        if let Some(selection) = table(&toml_value, "selection")? {
            config.parse_selection(selection)?;
        }
        if let Some(export) = table(&toml_value, "export")? {
            config.parse_export(export)?;
        }

        config.validate()?;
        debug!("Configuration: {:?}", config);
        Ok(config)
    }

    fn parse_run(&mut self, run: &toml::Value) -> GrabResult<()> {
        if let Some(year) = opt_integer(run, "year")? {
            self.year = i32::try_from(year)
                .map_err(|_| GrabError::ConfigError(format!("year {} out of range", year)))?;
        }

        if let Some(months) = run.get("months") {
            let months = months.as_array()
                .ok_or_else(|| GrabError::ConfigError("'months' must be an array of integers".to_string()))?;
            self.months = months.iter()
                .map(|m| m.as_integer()
                    .and_then(|m| u32::try_from(m).ok())
                    .ok_or_else(|| GrabError::ConfigError(format!("invalid month {}", m))))
                .collect::<GrabResult<Vec<u32>>>()?;
        } else if let Some(month) = opt_integer(run, "month")? {
            let month = u32::try_from(month)
                .map_err(|_| GrabError::ConfigError(format!("invalid month {}", month)))?;
            self.months = vec![month];
        }

        if let Some(prefix) = opt_str(run, "output_prefix")? {
            self.output_prefix = prefix.to_string();
        }
        Ok(())
    }

    fn parse_region(&mut self, region: &toml::Value) -> GrabResult<()> {
        if let Some(crs) = opt_str(region, "crs")? {
            self.region_crs = CoordinateSystem::from_string(crs)?;
        }

        let buffer_meters = match opt_f64(region, "buffer_meters")? {
            Some(buffer) => buffer,
            None => match &self.region {
                RegionSource::Points { buffer_meters, .. } => *buffer_meters,
                RegionSource::Rectangles(_) => 1000.0,
            },
        };

        let points = region.get("points");
        let rectangles = region.get("rectangles");

        self.region = match (points, rectangles) {
            (Some(_), Some(_)) => {
                return Err(GrabError::ConfigError(
                    "[region] takes either 'points' or 'rectangles', not both".to_string()));
            }
            (Some(points), None) => {
                let points = number_rows(points, "points", 2)?
                    .into_iter()
                    .map(|row| Point::new(row[0], row[1]))
                    .collect();
                RegionSource::Points { points, buffer_meters }
            }
            (None, Some(rectangles)) => {
                let rectangles = number_rows(rectangles, "rectangles", 4)?
                    .into_iter()
                    .map(|row| BoundingBox::new(row[0], row[1], row[2], row[3]))
                    .collect();
                RegionSource::Rectangles(rectangles)
            }
            (None, None) => RegionSource::Points { points: Vec::new(), buffer_meters },
        };
        Ok(())
    }

    fn parse_selection(&mut self, selection: &toml::Value) -> GrabResult<()> {
        if let Some(grouping) = opt_str(selection, "grouping")? {
            self.grouping = GroupingKey::from_name(grouping)?;
        }
        if let Some(ranking) = opt_str(selection, "ranking")? {
            self.ranking = RankingMetric::from_name(ranking)?;
        }
        if let Some(max) = opt_integer(selection, "max_composites")? {
            let max = usize::try_from(max)
                .map_err(|_| GrabError::ConfigError(format!("max_composites must be at least 1, got {}", max)))?;
            self.max_composites = Some(max);
        }
        self.max_cloud_percentage = opt_f64(selection, "max_cloud_percentage")?;
        Ok(())
    }

    fn parse_export(&mut self, export: &toml::Value) -> GrabResult<()> {
        if let Some(mode) = opt_str(export, "output")? {
            self.output_mode = OutputMode::from_name(mode)?;
        }
        if let Some(split) = export.get("split_quadrants") {
            self.split_quadrants = split.as_bool()
                .ok_or_else(|| GrabError::ConfigError("'split_quadrants' must be a boolean".to_string()))?;
        }
        if let Some(scale) = opt_f64(export, "scale")? {
            self.export.scale = scale;
        }
        if let Some(crs) = opt_str(export, "crs")? {
            self.export.crs = CoordinateSystem::from_string(crs)?;
        }
        if let Some(max_pixels) = opt_integer(export, "max_pixels")? {
            self.export.max_pixels = u64::try_from(max_pixels)
                .map_err(|_| GrabError::ConfigError(format!("max_pixels must be positive, got {}", max_pixels)))?;
        }
        if let Some(fill) = opt_integer(export, "fill_value")? {
            self.export.fill_value = i16::try_from(fill)
                .map_err(|_| GrabError::ConfigError(format!("fill_value {} does not fit in int16", fill)))?;
        }
        if let Some(compression) = opt_str(export, "compression")? {
            let compression = CompressionFactory::kind_by_name(compression)?;
            self.export.format = ExportFormat::GeoTiff { compression };
        }
        if let Some(folder) = opt_str(export, "folder")? {
            self.export.folder = Some(folder.to_string());
        }
        if let Some(destination) = opt_str(export, "destination")? {
            self.destination = PathBuf::from(destination);
        }
        if let Some(quicklook) = export.get("quicklook") {
            self.quicklook = quicklook.as_bool()
                .ok_or_else(|| GrabError::ConfigError("'quicklook' must be a boolean".to_string()))?;
        }
        Ok(())
    }

    /// Check every value is in range
    pub fn validate(&self) -> GrabResult<()> {
        if !(1..=9999).contains(&self.year) {
            return Err(GrabError::ConfigError(format!("year must be in 1..=9999, got {}", self.year)));
        }
        if self.months.is_empty() {
            return Err(GrabError::ConfigError("at least one month is required".to_string()));
        }
        if let Some(month) = self.months.iter().find(|m| !(1..=12).contains(*m)) {
            return Err(GrabError::ConfigError(format!("month must be in 1..=12, got {}", month)));
        }
        if self.output_prefix.trim().is_empty() {
            return Err(GrabError::ConfigError("output_prefix must not be empty".to_string()));
        }

        match &self.region {
            RegionSource::Points { points, buffer_meters } => {
                if points.is_empty() {
                    return Err(GrabError::ConfigError("[region] needs 'points' or 'rectangles'".to_string()));
                }
                if !(buffer_meters.is_finite() && *buffer_meters > 0.0) {
                    return Err(GrabError::ConfigError(format!(
                        "buffer_meters must be positive, got {}", buffer_meters)));
                }
                if let Some(point) = points.iter().find(|p| !(p.x.is_finite() && p.y.is_finite())) {
                    return Err(GrabError::ConfigError(format!(
                        "point ({}, {}) is not finite", point.x, point.y)));
                }
            }
            RegionSource::Rectangles(rectangles) => {
                if rectangles.is_empty() {
                    return Err(GrabError::ConfigError("[region] needs 'points' or 'rectangles'".to_string()));
                }
                if let Some(rect) = rectangles.iter().find(|r| !r.is_finite()) {
                    return Err(GrabError::ConfigError(format!("rectangle {} is not finite", rect)));
                }
                if let Some(rect) = rectangles.iter().find(|r| r.min_x > r.max_x || r.min_y > r.max_y) {
                    return Err(GrabError::ConfigError(format!("rectangle {} has min above max", rect)));
                }
            }
        }

        if self.max_composites == Some(0) {
            return Err(GrabError::ConfigError("max_composites must be at least 1, got 0".to_string()));
        }
        if let Some(threshold) = self.max_cloud_percentage {
            if !(0.0..=100.0).contains(&threshold) {
                return Err(GrabError::ConfigError(format!(
                    "max_cloud_percentage must be in 0..=100, got {}", threshold)));
            }
        }
        if !(self.export.scale.is_finite() && self.export.scale > 0.0) {
            return Err(GrabError::ConfigError(format!("scale must be positive, got {}", self.export.scale)));
        }
        if self.export.max_pixels == 0 {
            return Err(GrabError::ConfigError("max_pixels must be positive, got 0".to_string()));
        }

        Ok(())
    }

    /// Region of interest in the region CRS
    pub fn region_of_interest(&self) -> GrabResult<RegionOfInterest> {
        match &self.region {
            RegionSource::Points { points, buffer_meters } =>
                RegionOfInterest::from_points(points, *buffer_meters, self.region_crs),
            RegionSource::Rectangles(rectangles) =>
                RegionOfInterest::from_rectangles(rectangles.clone(), self.region_crs),
        }
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        let policy = SelectionPolicy::new(self.grouping, self.ranking,
                                          self.max_composites.unwrap_or(usize::MAX));
        match self.max_cloud_percentage {
            Some(threshold) => policy.with_cloud_threshold(threshold),
            None => policy,
        }
    }

    /// Base output name for a month, `{prefix}_{year}_{month}`
    pub fn base_name(&self, month: u32) -> String {
        format!("{}_{}_{}", self.output_prefix, self.year, month)
    }
}

fn table<'v>(root: &'v toml::Value, name: &str) -> GrabResult<Option<&'v toml::Value>> {
    match root.get(name) {
        Some(value) if value.is_table() => Ok(Some(value)),
        Some(_) => Err(GrabError::ConfigError(format!("[{}] must be a table", name))),
        None => Ok(None),
    }
}

fn opt_str<'v>(table: &'v toml::Value, key: &str) -> GrabResult<Option<&'v str>> {
    match table.get(key) {
        Some(value) => value.as_str()
            .map(Some)
            .ok_or_else(|| GrabError::ConfigError(format!("'{}' must be a string", key))),
        None => Ok(None),
    }
}

fn opt_integer(table: &toml::Value, key: &str) -> GrabResult<Option<i64>> {
    match table.get(key) {
        Some(value) => value.as_integer()
            .map(Some)
            .ok_or_else(|| GrabError::ConfigError(format!("'{}' must be an integer", key))),
        None => Ok(None),
    }
}

fn as_f64(value: &toml::Value) -> Option<f64> {
    value.as_float().or_else(|| value.as_integer().map(|i| i as f64))
}

fn opt_f64(table: &toml::Value, key: &str) -> GrabResult<Option<f64>> {
    match table.get(key) {
        Some(value) => as_f64(value)
            .map(Some)
            .ok_or_else(|| GrabError::ConfigError(format!("'{}' must be a number", key))),
        None => Ok(None),
    }
}

/// Array of fixed-length numeric arrays
fn number_rows(value: &toml::Value, key: &str, len: usize) -> GrabResult<Vec<Vec<f64>>> {
    let rows = value.as_array()
        .ok_or_else(|| GrabError::ConfigError(format!("'{}' must be an array", key)))?;

    rows.iter()
        .map(|row| {
            let numbers: Vec<f64> = row.as_array()
                .map(|items| items.iter().filter_map(as_f64).collect())
                .unwrap_or_default();
            if numbers.len() == len {
                Ok(numbers)
            } else {
                Err(GrabError::ConfigError(format!("each entry of '{}' needs {} numbers, got {}", key, len, row)))
            }
        })
        .collect()
}
