use std::{fs, io::Write};

use fake::{
    faker::{boolean::en::Boolean, name::en::FirstName},
    Dummy, Fake, Faker,
};
use tempfile::NamedTempFile;

use folio::{
    error::Error,
    pagination::{parse_param, DEFAULT_PAGE, DEFAULT_PAGE_SIZE},
    range_for, Config, Paginator, Record, Result, Store,
};

const ETHNICITIES: [&str; 4] = [
    "ASIAN AND PACIFIC ISLANDER",
    "BLACK NON HISPANIC",
    "HISPANIC",
    "WHITE NON HISPANIC",
];

#[derive(Debug, Dummy)]
struct BabyName {
    #[dummy(faker = "2011..2017")]
    year: u16,
    #[dummy(faker = "Boolean(50)")]
    female: bool,
    #[dummy(faker = "0..4")]
    ethnicity: usize,
    #[dummy(faker = "FirstName()")]
    name: String,
    #[dummy(faker = "10..300")]
    count: u32,
    #[dummy(faker = "1..100")]
    rank: u32,
}

struct State {
    csv: NamedTempFile,
    names: Vec<BabyName>,
    store: Store,
}

impl State {
    fn new(rows: usize) -> Self {
        Self::with_config(rows, Config::default())
    }

    fn with_config(rows: usize, config: Config) -> Self {
        let names: Vec<BabyName> = (0..rows).map(|_| Faker.fake()).collect();

        let mut csv = NamedTempFile::new().expect("create tmp csv");
        writeln!(csv, "Year of Birth,Gender,Ethnicity,Child's First Name,Count,Rank").unwrap();
        for name in &names {
            writeln!(
                csv,
                "{},{},{},{},{},{}",
                name.year,
                if name.female { "FEMALE" } else { "MALE" },
                ETHNICITIES[name.ethnicity],
                name.name,
                name.count,
                name.rank
            )
            .unwrap();
        }

        let store = Store::new(config.data_file(csv.path()));
        Self { csv, names, store }
    }

    fn paginator(&self) -> Paginator<'_> {
        Paginator::new(&self.store)
    }

    fn first_names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|record| record[3].as_str()).collect()
    }
}

#[test]
fn first_page_follows_load_order() -> Result<()> {
    let state = State::new(50);
    let page = state.paginator().get_page(1, 10)?;

    let expected: Vec<&str> = state.names[..10].iter().map(|n| n.name.as_str()).collect();
    assert_eq!(State::first_names(page), expected);
    assert_eq!(page[0].len(), 6);

    Ok(())
}

#[test]
fn offset_pages_cover_the_dataset_once() -> Result<()> {
    let state = State::new(97);
    let paginator = state.paginator();

    let mut seen = Vec::new();
    let mut page = Some(DEFAULT_PAGE);
    while let Some(current) = page {
        let hyper = paginator.get_hyper(current, DEFAULT_PAGE_SIZE)?;
        assert_eq!(hyper.page_size, hyper.data.len());
        assert_eq!(hyper.total_pages, 10);
        assert_eq!(hyper.prev_page.is_none(), current == 1);
        assert_eq!(hyper.next_page.is_none(), current == hyper.total_pages);

        seen.extend(hyper.data);
        page = hyper.next_page;
    }

    assert_eq!(seen.as_slice(), state.store.load()?.records());

    Ok(())
}

#[test]
fn out_of_range_page_is_empty() -> Result<()> {
    let state = State::new(50);

    assert!(state.paginator().get_page(1000, 10)?.is_empty());
    assert!(matches!(
        state.paginator().get_page(0, 10),
        Err(Error::InvalidArgument(_))
    ));

    Ok(())
}

#[test]
fn load_ignores_later_file_changes() -> Result<()> {
    let state = State::new(20);
    let before = state.store.load()?.clone();

    fs::write(state.csv.path(), "Year of Birth\n1900\n").unwrap();

    assert_eq!(state.store.load()?, &before);
    assert_eq!(state.paginator().get_hyper(2, 10)?.total_pages, 2);

    Ok(())
}

#[test]
fn index_pages_survive_deletions() -> Result<()> {
    let mut state = State::with_config(60, Config::default().index_capacity(Some(40)));

    let first = state.paginator().get_hyper_index(None, 15)?;
    assert_eq!(first.index, 0);
    assert_eq!(first.next_index, 15);

    let expected_next = state.store.load()?[16].clone();
    state.store.delete(first.next_index)?;

    let second = state.paginator().get_hyper_index(Some(first.next_index), 15)?;
    assert_eq!(second.data.first(), Some(&expected_next));
    assert_eq!(second.page_size, 15);
    assert_eq!(second.next_index, 31);

    let third = state.paginator().get_hyper_index(Some(second.next_index), 15)?;
    assert_eq!(third.page_size, 9);
    assert_eq!(third.next_index, 40);

    assert!(matches!(
        state.paginator().get_hyper_index(Some(40), 15),
        Err(Error::InvalidArgument(_))
    ));

    Ok(())
}

#[test]
fn hypermedia_descriptor_serialises() -> Result<()> {
    let state = State::new(3);

    let json = serde_json::to_value(state.paginator().get_hyper(1, 5)?).unwrap();
    assert_eq!(json["page_size"], 3);
    assert_eq!(json["total_pages"], 1);
    assert!(json["next_page"].is_null());
    assert!(json["prev_page"].is_null());
    assert_eq!(json["data"][0][3], state.names[0].name.as_str());

    let json = serde_json::to_value(state.paginator().get_hyper_index(Some(1), 1)?).unwrap();
    assert_eq!(json["index"], 1);
    assert_eq!(json["next_index"], 2);

    Ok(())
}

#[test]
fn query_parameters() -> Result<()> {
    let state = State::new(30);

    let page = parse_param("page", Some("3"), DEFAULT_PAGE)?;
    let page_size = parse_param("page_size", None, DEFAULT_PAGE_SIZE)?;
    assert_eq!(range_for(page, page_size)?, (20, 30));
    assert_eq!(state.paginator().get_page(page, page_size)?.len(), 10);

    assert!(parse_param("page", Some("-3"), DEFAULT_PAGE).is_err());

    Ok(())
}

#[test]
fn missing_dataset_fails_loudly() {
    let store = Store::open("missing/Popular_Baby_Names.csv");
    let paginator = Paginator::new(&store);

    assert!(matches!(
        paginator.get_hyper(1, 10),
        Err(Error::ResourceUnavailable { .. })
    ));
    assert!(matches!(
        paginator.get_hyper_index(None, 10),
        Err(Error::ResourceUnavailable { .. })
    ));
}
