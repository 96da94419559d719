use std::num::ParseIntError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataItem {
    id: Box<str>,
    numeric_id: i64,
    size: u64,
}

impl DataItem {
    pub fn new(id: impl Into<Box<str>>, numeric_id: i64, size: u64) -> DataItem {
        DataItem {
            id: id.into(),
            numeric_id,
            size,
        }
    }

    pub fn parse(id: &str, radix: u32, size: u64) -> Result<DataItem, ParseIntError> {
        Ok(DataItem::new(id, i64::from_str_radix(id, radix)?, size))
    }

    pub fn id(&self) -> &str {
        self.id.as_ref()
    }

    pub fn numeric_id(&self) -> i64 {
        self.numeric_id
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

pub trait ItemFactory {
    type Item;

    fn make_item(&self, id: &str, numeric_id: i64, size: u64) -> Self::Item;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DataItemFactory;

impl ItemFactory for DataItemFactory {
    type Item = DataItem;

    fn make_item(&self, id: &str, numeric_id: i64, size: u64) -> DataItem {
        DataItem::new(id, numeric_id, size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_radix_36_id() {
        let item = DataItem::parse("00003brre8lgz", 36, 10240).unwrap();
        assert_eq!(item.id(), "00003brre8lgz");
        assert_eq!(item.numeric_id(), i64::from_str_radix("00003brre8lgz", 36).unwrap());
        assert_eq!(item.size(), 10240);
    }

    #[test]
    fn test_parse_rejects_foreign_digits() {
        assert!(DataItem::parse("00003brre8lgz", 10, 10240).is_err());
    }

    #[test]
    fn test_item_factory() {
        let factory = DataItemFactory;
        let item = factory.make_item("0000012345", 12345, 42);
        assert_eq!(item, DataItem::new("0000012345", 12345, 42));
    }
}
