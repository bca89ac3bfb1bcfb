use std::io::{BufWriter, Write};
use std::path::Path;

use geojson::{Feature, GeoJson, Geometry, JsonObject, Value};

use crate::{Result, SampleSequence};

/// One `latitude,longitude` record per sample, in order, with no header row.
pub fn write_csv<W: Write>(samples: &SampleSequence, writer: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    for pt in samples.points() {
        writer.serialize((pt.lat(), pt.lon()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn save_csv<P: AsRef<Path>>(samples: &SampleSequence, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = fs_err::File::create(path)?;
    write_csv(samples, BufWriter::new(file))?;
    info!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}

/// The samples as a single LineString. GeoJSON positions are (longitude, latitude).
pub fn to_geojson(samples: &SampleSequence) -> Feature {
    let line = samples
        .points()
        .iter()
        .map(|pt| vec![pt.lon(), pt.lat()])
        .collect();

    let mut properties = JsonObject::new();
    properties.insert("speed_mps".to_string(), samples.speed_mps().into());
    properties.insert("period_s".to_string(), samples.period_s().into());
    properties.insert("samples".to_string(), samples.len().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::LineString(line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

pub fn save_geojson<P: AsRef<Path>>(samples: &SampleSequence, path: P) -> Result<()> {
    let path = path.as_ref();
    let geojson = GeoJson::Feature(to_geojson(samples));
    fs_err::write(path, geojson.to_string())?;
    info!("Wrote {} samples to {}", samples.len(), path.display());
    Ok(())
}
