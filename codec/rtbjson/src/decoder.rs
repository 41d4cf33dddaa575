//! Contains the base schema reader mapping the OpenRTB records from a token
//! stream, handing the extension wrapper objects to the read protocol.

use rtbjson_extension::{read_extensions, Error, Registry};
use rtbjson_model::{
    category,
    enums::{Enumeration, Gender},
    request::{
        App, Banner, BidRequest, Device, Geo, Imp, Publisher, Regs, Site,
        Source, User, Video,
    },
    response::{Bid, BidResponse, SeatBid},
    Extendable,
};
use rtbjson_stream::{ByteIndex, Cursor};

use crate::options::Options;


/// Implemented by the records the decoder knows the fields of.
pub(crate) trait ReadFields: Extendable {
    /// Reads the value of a base schema field. Returns `false` without
    /// touching the cursor if the field is unknown.
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error>;
}

/// Reads the records of a single document.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Decoder<'a> {
    registry: &'a Registry,
    options: &'a Options,
}

impl<'a> Decoder<'a> {
    pub(crate) const fn new(
        registry: &'a Registry,
        options: &'a Options,
    ) -> Self {
        Self { registry, options }
    }

    /// Reads the record object under the cursor.
    ///
    /// A `null` field value leaves the field unset, unknown fields are
    /// skipped.
    pub(crate) fn record<R: ReadFields>(
        &self,
        cursor: &mut Cursor<'_>,
    ) -> Result<R, Error> {
        let mut record = R::default();

        cursor.begin_object()?;

        while cursor.has_next() {
            let field = cursor.field_name()?;

            if cursor.null() {
                continue;
            }

            if field == self.options.wrapper_key {
                read_extensions(self.registry, &mut record, cursor)?;
            } else if !record.read_field(self, field, cursor)? {
                log::debug!(
                    "skipping unknown field `{field}` of `{}` at byte {}",
                    R::NAME,
                    cursor.location()
                );

                cursor.skip_value()?;
            }
        }

        cursor.end_object()?;

        Ok(record)
    }

    /// Reads an array of record objects.
    pub(crate) fn records<R: ReadFields>(
        &self,
        cursor: &mut Cursor<'_>,
    ) -> Result<Vec<R>, Error> {
        let mut records = Vec::new();

        cursor.begin_array()?;
        while cursor.has_next() {
            records.push(self.record(cursor)?);
        }
        cursor.end_array()?;

        Ok(records)
    }

    fn string(cursor: &mut Cursor<'_>) -> Result<String, Error> {
        Ok(cursor.string()?.to_owned())
    }

    /// Applies the strictness policy to an invalid value.
    fn invalid(
        &self,
        field: &str,
        value: String,
        at: ByteIndex,
    ) -> Result<(), Error> {
        if self.options.strict {
            return Err(Error::InvalidValue {
                field: field.to_owned(),
                value,
                at,
            });
        }

        log::warn!(
            "dropping invalid value `{value}` of `{field}` at byte {at}"
        );

        Ok(())
    }

    fn enumeration<E: Enumeration>(
        &self,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Option<E>, Error> {
        let at = cursor.location();
        let code = cursor.integer()?;

        match E::from_code(code) {
            Some(value) => Ok(Some(value)),
            None => self.invalid(field, code.to_string(), at).map(|()| None),
        }
    }

    fn gender(
        &self,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Option<Gender>, Error> {
        let at = cursor.location();
        let code = cursor.string()?;

        match Gender::from_code(code) {
            Some(gender) => Ok(Some(gender)),
            None => self.invalid(field, code.to_owned(), at).map(|()| None),
        }
    }

    /// Reads a list of IAB content categories, invalid codes are subject to
    /// the strictness policy one by one.
    fn categories(
        &self,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<Vec<String>, Error> {
        let mut categories = Vec::new();

        for (code, at) in cursor.located_string_list()? {
            if category::is_valid(&code) {
                categories.push(code);
            } else {
                self.invalid(field, code, at)?;
            }
        }

        Ok(categories)
    }
}

impl ReadFields for BidRequest {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "id" => self.id = Some(Decoder::string(cursor)?),
            "imp" => self.imp = decoder.records(cursor)?,
            "site" => self.site = Some(decoder.record(cursor)?),
            "app" => self.app = Some(decoder.record(cursor)?),
            "device" => self.device = Some(decoder.record(cursor)?),
            "user" => self.user = Some(decoder.record(cursor)?),
            "regs" => self.regs = Some(decoder.record(cursor)?),
            "source" => self.source = Some(decoder.record(cursor)?),
            "test" => self.test = Some(cursor.boolean()?),
            "at" => self.at = decoder.enumeration(field, cursor)?,
            "tmax" => self.tmax = Some(cursor.unsigned()?),
            "cur" => self.cur = cursor.string_list()?,
            "bcat" => self.bcat = decoder.categories(field, cursor)?,
            "badv" => self.badv = cursor.string_list()?,
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Imp {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "id" => self.id = Some(Decoder::string(cursor)?),
            "banner" => self.banner = Some(decoder.record(cursor)?),
            "video" => self.video = Some(decoder.record(cursor)?),
            "tagid" => self.tagid = Some(Decoder::string(cursor)?),
            "bidfloor" => self.bidfloor = Some(cursor.float()?),
            "bidfloorcur" => {
                self.bidfloorcur = Some(Decoder::string(cursor)?);
            }
            "secure" => self.secure = Some(cursor.boolean()?),
            "instl" => self.instl = Some(cursor.boolean()?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Banner {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "w" => self.w = Some(cursor.unsigned()?),
            "h" => self.h = Some(cursor.unsigned()?),
            "pos" => self.pos = decoder.enumeration(field, cursor)?,
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Video {
    fn read_field(
        &mut self,
        _: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "mimes" => self.mimes = cursor.string_list()?,
            "minduration" => self.minduration = Some(cursor.unsigned()?),
            "maxduration" => self.maxduration = Some(cursor.unsigned()?),
            "w" => self.w = Some(cursor.unsigned()?),
            "h" => self.h = Some(cursor.unsigned()?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Site {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "id" => self.id = Some(Decoder::string(cursor)?),
            "name" => self.name = Some(Decoder::string(cursor)?),
            "domain" => self.domain = Some(Decoder::string(cursor)?),
            "cat" => self.cat = decoder.categories(field, cursor)?,
            "page" => self.page = Some(Decoder::string(cursor)?),
            "publisher" => self.publisher = Some(decoder.record(cursor)?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for App {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "id" => self.id = Some(Decoder::string(cursor)?),
            "name" => self.name = Some(Decoder::string(cursor)?),
            "bundle" => self.bundle = Some(Decoder::string(cursor)?),
            "cat" => self.cat = decoder.categories(field, cursor)?,
            "publisher" => self.publisher = Some(decoder.record(cursor)?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Publisher {
    fn read_field(
        &mut self,
        _: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "id" => self.id = Some(Decoder::string(cursor)?),
            "name" => self.name = Some(Decoder::string(cursor)?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Device {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "ua" => self.ua = Some(Decoder::string(cursor)?),
            "ip" => self.ip = Some(Decoder::string(cursor)?),
            "devicetype" => {
                self.devicetype = decoder.enumeration(field, cursor)?;
            }
            "make" => self.make = Some(Decoder::string(cursor)?),
            "model" => self.model = Some(Decoder::string(cursor)?),
            "os" => self.os = Some(Decoder::string(cursor)?),
            "geo" => self.geo = Some(decoder.record(cursor)?),
            "dnt" => self.dnt = Some(cursor.boolean()?),
            "lmt" => self.lmt = Some(cursor.boolean()?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Geo {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "lat" => self.lat = Some(cursor.float()?),
            "lon" => self.lon = Some(cursor.float()?),
            "country" => self.country = Some(Decoder::string(cursor)?),
            "region" => self.region = Some(Decoder::string(cursor)?),
            "city" => self.city = Some(Decoder::string(cursor)?),
            "type" => {
                self.location_type = decoder.enumeration(field, cursor)?;
            }
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for User {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "id" => self.id = Some(Decoder::string(cursor)?),
            "buyeruid" => self.buyeruid = Some(Decoder::string(cursor)?),
            "yob" => self.yob = Some(cursor.integer()?),
            "gender" => self.gender = decoder.gender(field, cursor)?,
            "geo" => self.geo = Some(decoder.record(cursor)?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Regs {
    fn read_field(
        &mut self,
        _: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "coppa" => self.coppa = Some(cursor.boolean()?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Source {
    fn read_field(
        &mut self,
        _: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "fd" => self.fd = Some(cursor.boolean()?),
            "tid" => self.tid = Some(Decoder::string(cursor)?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for BidResponse {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "id" => self.id = Some(Decoder::string(cursor)?),
            "seatbid" => self.seatbid = decoder.records(cursor)?,
            "bidid" => self.bidid = Some(Decoder::string(cursor)?),
            "cur" => self.cur = Some(Decoder::string(cursor)?),
            "nbr" => self.nbr = decoder.enumeration(field, cursor)?,
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for SeatBid {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "seat" => self.seat = Some(Decoder::string(cursor)?),
            "bid" => self.bid = decoder.records(cursor)?,
            "group" => self.group = Some(cursor.boolean()?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}

impl ReadFields for Bid {
    fn read_field(
        &mut self,
        decoder: &Decoder<'_>,
        field: &str,
        cursor: &mut Cursor<'_>,
    ) -> Result<bool, Error> {
        match field {
            "id" => self.id = Some(Decoder::string(cursor)?),
            "impid" => self.impid = Some(Decoder::string(cursor)?),
            "price" => self.price = Some(cursor.float()?),
            "adid" => self.adid = Some(Decoder::string(cursor)?),
            "nurl" => self.nurl = Some(Decoder::string(cursor)?),
            "adm" => self.adm = Some(Decoder::string(cursor)?),
            "adomain" => self.adomain = cursor.string_list()?,
            "cid" => self.cid = Some(Decoder::string(cursor)?),
            "crid" => self.crid = Some(Decoder::string(cursor)?),
            "cat" => self.cat = decoder.categories(field, cursor)?,
            "w" => self.w = Some(cursor.unsigned()?),
            "h" => self.h = Some(cursor.unsigned()?),
            _ => return Ok(false),
        }

        Ok(true)
    }
}
