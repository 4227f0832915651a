// Example: a grouped source with group headers, edited at both levels.
use std::rc::Rc;

use itemsource::{
    CommandLog, GroupItems, GroupedItemsViewSource, ItemsCollection, ItemsViewSource,
    ObservableVec, SourceFactory, SourceItem, SourceOptions,
};

#[derive(Clone, Debug)]
struct Section {
    title: &'static str,
    rows: Rc<ObservableVec<u32>>,
}

impl PartialEq for Section {
    fn eq(&self, other: &Self) -> bool {
        self.title == other.title
    }
}

impl GroupItems<u32> for Section {
    fn members(&self) -> ItemsCollection<u32> {
        ItemsCollection::observable(self.rows.clone())
    }
}

fn section(title: &'static str, rows: &[u32]) -> Section {
    Section {
        title,
        rows: Rc::new(rows.iter().copied().collect()),
    }
}

fn main() {
    let log = Rc::new(CommandLog::new());
    let factory: SourceFactory<Section, u32> = SourceFactory::new(log.clone());

    let sections = Rc::new(ObservableVec::from_vec(vec![
        section("odd", &[1, 3, 5]),
        section("even", &[2, 4]),
    ]));
    let options = SourceOptions::new()
        .with_grouped(true)
        .with_header(true)
        .with_group_headers(true);
    let source = factory.create(Some(ItemsCollection::observable(sections.clone())), &options);

    let even = sections.with_items(|s| s[1].clone());
    even.rows.push(6);
    sections.insert(1, section("prime", &[2, 3, 5, 7])).unwrap();
    for command in log.take() {
        println!("{command:?}");
    }

    for position in 0..source.count() {
        let label = match source.item_at(position) {
            Ok(SourceItem::Header) => "header".to_string(),
            Ok(SourceItem::GroupHeader(s)) => format!("== {} ==", s.title),
            Ok(SourceItem::Member(n)) => n.to_string(),
            other => format!("{other:?}"),
        };
        let marker = if source.is_group_header(position) { "*" } else { " " };
        println!("{marker}{position:>3} {label}");
    }
}
