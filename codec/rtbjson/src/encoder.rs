//! Contains the base schema writer emitting the OpenRTB records, handing the
//! extension slots to the write protocol.

use rtbjson_extension::{write_extensions, Error, Registry};
use rtbjson_model::{
    enums::Enumeration,
    request::{
        App, Banner, BidRequest, Device, Geo, Imp, Publisher, Regs, Site,
        Source, User, Video,
    },
    response::{Bid, BidResponse, SeatBid},
    Extendable,
};
use rtbjson_stream::Generator;

use crate::options::Options;

#[cfg(test)]
mod test;

/// Implemented by the records the encoder knows the fields of.
pub(crate) trait WriteFields: Extendable {
    /// Writes every base schema field that is set.
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error>;
}

/// Writes the records of a single document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Encoder<'a> {
    registry: &'a Registry,
    options: &'a Options,
}

impl<'a> Encoder<'a> {
    pub(crate) const fn new(
        registry: &'a Registry,
        options: &'a Options,
    ) -> Self {
        Self { registry, options }
    }

    /// Writes the record as an object, its extension wrapper comes last.
    pub(crate) fn record<R: WriteFields>(
        self,
        record: &R,
        generator: &mut Generator,
    ) -> Result<(), Error> {
        generator.begin_object()?;

        record.write_fields(&mut Fields { encoder: self, generator })?;
        write_extensions(
            self.registry,
            record,
            &self.options.wrapper_key,
            generator,
        )?;

        generator.end_object()?;

        Ok(())
    }
}

/// Writes the fields of the record object being encoded, skipping the unset
/// ones.
#[derive(Debug)]
pub(crate) struct Fields<'e, 'g> {
    encoder: Encoder<'e>,
    generator: &'g mut Generator,
}

impl Fields<'_, '_> {
    pub(crate) fn string(
        &mut self,
        name: &str,
        value: Option<&str>,
    ) -> Result<&mut Self, Error> {
        if let Some(value) = value {
            self.generator.field_name(name)?;
            self.generator.string(value)?;
        }

        Ok(self)
    }

    pub(crate) fn strings(
        &mut self,
        name: &str,
        values: &[String],
    ) -> Result<&mut Self, Error> {
        if !values.is_empty() {
            self.generator.field_name(name)?;
            self.generator.begin_array()?;
            for value in values {
                self.generator.string(value)?;
            }
            self.generator.end_array()?;
        }

        Ok(self)
    }

    pub(crate) fn integer(
        &mut self,
        name: &str,
        value: Option<i64>,
    ) -> Result<&mut Self, Error> {
        if let Some(value) = value {
            self.generator.field_name(name)?;
            self.generator.integer(value)?;
        }

        Ok(self)
    }

    pub(crate) fn unsigned(
        &mut self,
        name: &str,
        value: Option<u64>,
    ) -> Result<&mut Self, Error> {
        if let Some(value) = value {
            self.generator.field_name(name)?;
            self.generator.unsigned(value)?;
        }

        Ok(self)
    }

    pub(crate) fn float(
        &mut self,
        name: &str,
        value: Option<f64>,
    ) -> Result<&mut Self, Error> {
        if let Some(value) = value {
            self.generator.field_name(name)?;
            self.generator.float(value)?;
        }

        Ok(self)
    }

    /// Writes an OpenRTB flag as `0` or `1`.
    pub(crate) fn flag(
        &mut self,
        name: &str,
        value: Option<bool>,
    ) -> Result<&mut Self, Error> {
        self.unsigned(name, value.map(u64::from))
    }

    pub(crate) fn enumeration<E: Enumeration>(
        &mut self,
        name: &str,
        value: Option<E>,
    ) -> Result<&mut Self, Error> {
        self.integer(name, value.map(E::code))
    }

    pub(crate) fn record<R: WriteFields>(
        &mut self,
        name: &str,
        record: Option<&R>,
    ) -> Result<&mut Self, Error> {
        if let Some(record) = record {
            self.generator.field_name(name)?;
            self.encoder.record(record, self.generator)?;
        }

        Ok(self)
    }

    pub(crate) fn records<R: WriteFields>(
        &mut self,
        name: &str,
        records: &[R],
    ) -> Result<&mut Self, Error> {
        if !records.is_empty() {
            self.generator.field_name(name)?;
            self.generator.begin_array()?;
            for record in records {
                self.encoder.record(record, self.generator)?;
            }
            self.generator.end_array()?;
        }

        Ok(self)
    }
}

impl WriteFields for BidRequest {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("id", self.id.as_deref())?
            .records("imp", &self.imp)?
            .record("site", self.site.as_ref())?
            .record("app", self.app.as_ref())?
            .record("device", self.device.as_ref())?
            .record("user", self.user.as_ref())?
            .record("regs", self.regs.as_ref())?
            .record("source", self.source.as_ref())?
            .flag("test", self.test)?
            .enumeration("at", self.at)?
            .unsigned("tmax", self.tmax)?
            .strings("cur", &self.cur)?
            .strings("bcat", &self.bcat)?
            .strings("badv", &self.badv)?;

        Ok(())
    }
}

impl WriteFields for Imp {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("id", self.id.as_deref())?
            .record("banner", self.banner.as_ref())?
            .record("video", self.video.as_ref())?
            .string("tagid", self.tagid.as_deref())?
            .float("bidfloor", self.bidfloor)?
            .string("bidfloorcur", self.bidfloorcur.as_deref())?
            .flag("secure", self.secure)?
            .flag("instl", self.instl)?;

        Ok(())
    }
}

impl WriteFields for Banner {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .unsigned("w", self.w)?
            .unsigned("h", self.h)?
            .enumeration("pos", self.pos)?;

        Ok(())
    }
}

impl WriteFields for Video {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .strings("mimes", &self.mimes)?
            .unsigned("minduration", self.minduration)?
            .unsigned("maxduration", self.maxduration)?
            .unsigned("w", self.w)?
            .unsigned("h", self.h)?;

        Ok(())
    }
}

impl WriteFields for Site {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("id", self.id.as_deref())?
            .string("name", self.name.as_deref())?
            .string("domain", self.domain.as_deref())?
            .strings("cat", &self.cat)?
            .string("page", self.page.as_deref())?
            .record("publisher", self.publisher.as_ref())?;

        Ok(())
    }
}

impl WriteFields for App {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("id", self.id.as_deref())?
            .string("name", self.name.as_deref())?
            .string("bundle", self.bundle.as_deref())?
            .strings("cat", &self.cat)?
            .record("publisher", self.publisher.as_ref())?;

        Ok(())
    }
}

impl WriteFields for Publisher {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("id", self.id.as_deref())?
            .string("name", self.name.as_deref())?;

        Ok(())
    }
}

impl WriteFields for Device {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("ua", self.ua.as_deref())?
            .string("ip", self.ip.as_deref())?
            .enumeration("devicetype", self.devicetype)?
            .string("make", self.make.as_deref())?
            .string("model", self.model.as_deref())?
            .string("os", self.os.as_deref())?
            .record("geo", self.geo.as_ref())?
            .flag("dnt", self.dnt)?
            .flag("lmt", self.lmt)?;

        Ok(())
    }
}

impl WriteFields for Geo {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .float("lat", self.lat)?
            .float("lon", self.lon)?
            .string("country", self.country.as_deref())?
            .string("region", self.region.as_deref())?
            .string("city", self.city.as_deref())?
            .enumeration("type", self.location_type)?;

        Ok(())
    }
}

impl WriteFields for User {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("id", self.id.as_deref())?
            .string("buyeruid", self.buyeruid.as_deref())?
            .integer("yob", self.yob)?
            .string("gender", self.gender.map(|gender| gender.code()))?
            .record("geo", self.geo.as_ref())?;

        Ok(())
    }
}

impl WriteFields for Regs {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields.flag("coppa", self.coppa)?;

        Ok(())
    }
}

impl WriteFields for Source {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields.flag("fd", self.fd)?.string("tid", self.tid.as_deref())?;

        Ok(())
    }
}

impl WriteFields for BidResponse {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("id", self.id.as_deref())?
            .records("seatbid", &self.seatbid)?
            .string("bidid", self.bidid.as_deref())?
            .string("cur", self.cur.as_deref())?
            .enumeration("nbr", self.nbr)?;

        Ok(())
    }
}

impl WriteFields for SeatBid {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("seat", self.seat.as_deref())?
            .records("bid", &self.bid)?
            .flag("group", self.group)?;

        Ok(())
    }
}

impl WriteFields for Bid {
    fn write_fields(&self, fields: &mut Fields<'_, '_>) -> Result<(), Error> {
        fields
            .string("id", self.id.as_deref())?
            .string("impid", self.impid.as_deref())?
            .float("price", self.price)?
            .string("adid", self.adid.as_deref())?
            .string("nurl", self.nurl.as_deref())?
            .string("adm", self.adm.as_deref())?
            .strings("adomain", &self.adomain)?
            .string("cid", self.cid.as_deref())?
            .string("crid", self.crid.as_deref())?
            .strings("cat", &self.cat)?
            .unsigned("w", self.w)?
            .unsigned("h", self.h)?;

        Ok(())
    }
}
