// Linkshelf services
// Stateless helpers shared by the managers: the tag/property codec and
// read-time field derivations.

pub mod codec;
pub mod derived_fields;
