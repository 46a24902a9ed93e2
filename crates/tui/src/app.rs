use std::{io, thread, time::Duration};

use anyhow::{Context, Result};
use arg_core::{
    dashboard::{format_myr, group_thousands},
    pricing::{self, ComponentKind},
    wallet::{DEMO_COUPON_MYR, DEMO_POINTS},
    AnimalType, Listing, NavigationState, ProcessType, ShopSession, SortKey, SupplierDashboard,
};
use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        BarChart, Block, Borders, Cell, Gauge, List, ListItem, ListState, Paragraph, Row, Table,
        Tabs, Wrap,
    },
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info};

const TICK_RATE: Duration = Duration::from_millis(250);
const SIDEBAR_WIDTH: u16 = 22;

#[derive(Debug, Clone)]
struct Theme {
    primary_fg: Color,
    accent: Color,
    muted: Color,
    selection_bg: Color,
    success: Color,
    warning: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_fg: Color::White,
            accent: Color::Cyan,
            muted: Color::DarkGray,
            selection_bg: Color::DarkGray,
            success: Color::Green,
            warning: Color::Yellow,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Shop,
    Discover,
    Wallet,
}

impl Page {
    const ALL: [Page; 3] = [Page::Shop, Page::Discover, Page::Wallet];

    fn title(self) -> &'static str {
        match self {
            Page::Shop => "Shop",
            Page::Discover => "Discover",
            Page::Wallet => "Wallet",
        }
    }

    fn header(self) -> &'static str {
        match self {
            Page::Shop => "ARG Marketplace",
            Page::Discover => "Supplier Suite",
            Page::Wallet => "Wallet",
        }
    }

    fn next(self) -> Self {
        match self {
            Page::Shop => Page::Discover,
            Page::Discover => Page::Wallet,
            Page::Wallet => Page::Shop,
        }
    }
}

enum AppEvent {
    Input(Event),
    Tick,
}

/// Terminal front end for one shop session.
pub struct ArgApp {
    shop: ShopSession,
    dashboard: SupplierDashboard,
    top_ups: Vec<u32>,
    state: UiState,
    theme: Theme,
}

impl ArgApp {
    pub fn new(shop: ShopSession, dashboard: SupplierDashboard, top_ups: Vec<u32>) -> Self {
        Self {
            shop,
            dashboard,
            top_ups,
            state: UiState::default(),
            theme: Theme::default(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        self.state.set_status(format!(
            "Loaded {} listings • wallet RM {}",
            self.shop.catalog().len(),
            format_amount(self.shop.balance(), 2)
        ));

        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enter raw mode")?;
        execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).context("failed to create terminal")?;
        terminal.hide_cursor()?;
        terminal.clear()?;

        let (event_tx, mut event_rx) = mpsc::channel::<AppEvent>(128);
        spawn_input_thread(event_tx);
        info!("Demo started");

        loop {
            terminal.draw(|frame| self.draw(frame))?;
            if self.state.should_quit {
                break;
            }
            let maybe_event = event_rx.recv().await;
            if !self.process_app_event(maybe_event) {
                break;
            }
        }

        restore_terminal(&mut terminal)?;
        info!(balance = self.shop.balance(), "Demo finished");
        Ok(())
    }

    fn process_app_event(&mut self, maybe_event: Option<AppEvent>) -> bool {
        match maybe_event {
            Some(AppEvent::Input(Event::Key(key))) => {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
                true
            }
            Some(AppEvent::Input(_)) | Some(AppEvent::Tick) => true,
            None => false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_global_key(&key) {
            return;
        }
        match self.state.page {
            Page::Shop => self.handle_shop_key(key),
            Page::Discover => {}
            Page::Wallet => self.handle_wallet_key(key),
        }
    }

    fn handle_global_key(&mut self, key: &KeyEvent) -> bool {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            self.state.should_quit = true;
            return true;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.state.should_quit = true,
            KeyCode::Tab => self.switch_page(self.state.page.next()),
            KeyCode::Char('1') => self.switch_page(Page::Shop),
            KeyCode::Char('2') => self.switch_page(Page::Discover),
            KeyCode::Char('3') => self.switch_page(Page::Wallet),
            KeyCode::Char('r') => {
                self.shop.reset_all();
                self.state.reset_cursor();
                self.state.set_status("Shop flow reset".to_string());
            }
            _ => return false,
        }
        true
    }

    fn switch_page(&mut self, page: Page) {
        if self.state.page != page {
            debug!(page = page.title(), "Switching page");
            self.state.page = page;
        }
    }

    fn handle_shop_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Backspace => {
                if self.shop.back() {
                    self.state.reset_cursor();
                }
                return;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.move_cursor(-1, self.step_len());
                return;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.move_cursor(1, self.step_len());
                return;
            }
            _ => {}
        }

        match self.shop.state() {
            NavigationState::SelectingAnimal => {
                if key.code == KeyCode::Enter {
                    if let Some(animal) = AnimalType::ALL.get(self.state.cursor).copied() {
                        self.shop.choose_animal(animal);
                        self.state.reset_cursor();
                    }
                }
            }
            NavigationState::SelectingProcess => {
                if key.code == KeyCode::Enter {
                    if let Some(process) = ProcessType::ALL.get(self.state.cursor).copied() {
                        self.shop.choose_process(process);
                        self.state.reset_cursor();
                    }
                }
            }
            NavigationState::SelectingWeight => {
                if key.code == KeyCode::Enter {
                    let bucket = self
                        .shop
                        .catalog()
                        .weight_buckets()
                        .get(self.state.cursor)
                        .cloned();
                    if let Some(bucket) = bucket {
                        self.shop.choose_weight_bucket(bucket);
                        self.state.reset_cursor();
                    }
                }
            }
            NavigationState::BrowsingListings => self.handle_listing_key(key),
            NavigationState::ViewingDetail => self.handle_detail_key(key),
        }
    }

    fn handle_listing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(']') | KeyCode::Right => {
                self.state.sort_key = self.state.sort_key.next();
                self.state.reset_cursor();
            }
            KeyCode::Char('[') | KeyCode::Left => {
                self.state.sort_key = self.state.sort_key.previous();
                self.state.reset_cursor();
            }
            KeyCode::Enter => {
                if let Some(id) = self.highlighted_listing_id() {
                    self.shop.view_listing(&id);
                }
            }
            KeyCode::Char('c') => {
                let ack = self
                    .highlighted_listing_id()
                    .and_then(|id| self.shop.add_to_compare(&id));
                if let Some(ack) = ack {
                    self.state.set_status(ack.message());
                }
            }
            _ => {}
        }
    }

    fn handle_detail_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => self.shop.adjust_quantity(1),
            KeyCode::Char('-') | KeyCode::Left => self.shop.adjust_quantity(-1),
            KeyCode::PageUp => self.shop.adjust_quantity(10),
            KeyCode::PageDown => self.shop.adjust_quantity(-10),
            KeyCode::Char('g') => {
                if let Some(ack) = self.shop.join_group() {
                    self.state.set_status(ack.message());
                }
            }
            KeyCode::Char('b') => {
                if let Some(purchase) = self.shop.direct_buy() {
                    self.state.set_status(purchase.message());
                }
            }
            _ => {}
        }
    }

    fn handle_wallet_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.state.wallet_cursor = self.state.wallet_cursor.saturating_sub(1);
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let last = self.top_ups.len().saturating_sub(1);
                self.state.wallet_cursor = (self.state.wallet_cursor + 1).min(last);
            }
            KeyCode::Enter => {
                if let Some(amount) = self.top_ups.get(self.state.wallet_cursor).copied() {
                    if self.shop.top_up(f64::from(amount)) {
                        self.state.set_status(format!(
                            "Topped up RM {amount} • balance RM {}",
                            format_amount(self.shop.balance(), 2)
                        ));
                    }
                }
            }
            _ => {}
        }
    }

    /// Number of selectable rows on the current wizard step.
    fn step_len(&self) -> usize {
        match self.shop.state() {
            NavigationState::SelectingAnimal => AnimalType::ALL.len(),
            NavigationState::SelectingProcess => ProcessType::ALL.len(),
            NavigationState::SelectingWeight => self.shop.catalog().weight_buckets().len(),
            NavigationState::BrowsingListings => self.shop.listings(self.state.sort_key).len(),
            NavigationState::ViewingDetail => 0,
        }
    }

    fn highlighted_listing_id(&self) -> Option<String> {
        self.shop
            .listings(self.state.sort_key)
            .get(self.state.cursor)
            .map(|listing| listing.id.clone())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(8),
                Constraint::Length(3),
            ])
            .split(area);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(rows[1]);

        self.render_header(frame, rows[0]);
        self.render_sidebar(frame, body[0]);
        match self.state.page {
            Page::Shop => self.draw_shop(frame, body[1]),
            Page::Discover => self.draw_discover(frame, body[1]),
            Page::Wallet => self.draw_wallet(frame, body[1]),
        }
        self.render_status(frame, rows[2]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = match (self.state.page, self.shop.active_listing()) {
            (Page::Shop, Some(listing)) => listing.title.clone(),
            (page, _) => page.header().to_string(),
        };
        let line = Line::from(vec![
            Span::styled(
                format!(" 🐑 {title}"),
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Wallet (MYR) ", Style::default().fg(self.theme.muted)),
            Span::styled(
                format_amount(self.shop.balance(), 0),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn render_sidebar(&self, frame: &mut Frame, area: Rect) {
        let mut lines: Vec<Line> = Page::ALL
            .iter()
            .enumerate()
            .map(|(idx, page)| {
                let label = format!("{} {}", idx + 1, page.title());
                if *page == self.state.page {
                    Line::from(Span::styled(
                        format!("▶ {label}"),
                        Style::default()
                            .fg(self.theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(Span::styled(
                        format!("  {label}"),
                        Style::default().fg(self.theme.primary_fg),
                    ))
                }
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "r  Reset Shop Flow",
            Style::default().fg(self.theme.muted),
        )));
        lines.push(Line::from(Span::styled(
            "q  Quit",
            Style::default().fg(self.theme.muted),
        )));
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Navigation"));
        frame.render_widget(paragraph, area);
    }

    fn draw_shop(&mut self, frame: &mut Frame, area: Rect) {
        match self.shop.state() {
            NavigationState::SelectingAnimal => {
                let items: Vec<String> = AnimalType::ALL
                    .iter()
                    .map(|animal| format!("{} {}", animal.icon(), animal.label()))
                    .collect();
                self.render_choice_list(frame, area, "Please select your type of meat", items);
            }
            NavigationState::SelectingProcess => {
                let title = match self.shop.selection().animal {
                    Some(animal) => format!("{animal} — select processing"),
                    None => "Select processing".to_string(),
                };
                let items: Vec<String> = ProcessType::ALL
                    .iter()
                    .map(|process| format!("{} {}", process.icon(), process.label()))
                    .collect();
                self.render_choice_list(frame, area, &title, items);
            }
            NavigationState::SelectingWeight => {
                let items: Vec<String> = self
                    .shop
                    .catalog()
                    .weight_buckets()
                    .iter()
                    .map(|bucket| bucket.label.clone())
                    .collect();
                self.render_choice_list(frame, area, "Select weight range", items);
            }
            NavigationState::BrowsingListings => self.render_listings(frame, area),
            NavigationState::ViewingDetail => self.render_detail(frame, area),
        }
    }

    fn render_choice_list(&self, frame: &mut Frame, area: Rect, title: &str, items: Vec<String>) {
        let mut list_state = ListState::default();
        if !items.is_empty() {
            list_state.select(Some(self.state.cursor.min(items.len() - 1)));
        }
        let items: Vec<ListItem> = items
            .into_iter()
            .enumerate()
            .map(|(idx, label)| {
                let marker = if idx == self.state.cursor { "▶ " } else { "  " };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(self.theme.accent)),
                    Span::styled(label, Style::default().fg(self.theme.primary_fg)),
                ]))
            })
            .collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title.to_string()))
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_listings(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(area);

        let crumb = Paragraph::new(Line::from(Span::styled(
            self.shop.selection().breadcrumb(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(crumb, chunks[0]);

        let selected_tab = SortKey::ALL
            .iter()
            .position(|key| *key == self.state.sort_key)
            .unwrap_or(0);
        let tabs = Tabs::new(SortKey::ALL.iter().map(|key| key.tab_label()).collect::<Vec<_>>())
            .block(Block::default().borders(Borders::ALL))
            .select(selected_tab)
            .highlight_style(
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[1]);

        let listings = self.shop.listings(self.state.sort_key);
        let block = Block::default().borders(Borders::ALL).title("Listings");
        if listings.is_empty() {
            let empty = Paragraph::new("No listings match this selection. Esc to go back.")
                .style(Style::default().fg(self.theme.muted))
                .block(block);
            frame.render_widget(empty, chunks[2]);
            return;
        }

        let mut list_state = ListState::default();
        list_state.select(Some(self.state.cursor.min(listings.len() - 1)));
        let items: Vec<ListItem> = listings
            .iter()
            .map(|listing| ListItem::new(self.product_card(listing)))
            .collect();
        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().bg(self.theme.selection_bg));
        frame.render_stateful_widget(list, chunks[2], &mut list_state);
    }

    fn product_card(&self, listing: &Listing) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                format!("{} {}", listing.icon, listing.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                listing.caption(),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(Span::styled(
                format!("{:.2} RM/kg", pricing::price_per_kg(listing)),
                Style::default().fg(self.theme.success),
            )),
            Line::from(""),
        ]
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let Some(listing) = self.shop.active_listing() else {
            let paragraph = Paragraph::new("Listing unavailable")
                .block(Block::default().borders(Borders::ALL));
            frame.render_widget(paragraph, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6),
                Constraint::Length(4),
                Constraint::Length(7),
                Constraint::Min(4),
            ])
            .split(area);

        let summary = vec![
            Line::from(Span::styled(
                format!("{} {}", listing.icon, listing.title),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                listing.caption(),
                Style::default().fg(self.theme.muted),
            )),
            Line::from(vec![
                Span::raw("Price (RM/kg) "),
                Span::styled(
                    format!("{:.2}", pricing::price_per_kg(listing)),
                    Style::default()
                        .fg(self.theme.success)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(Span::styled(
                "Delivery cost included in price",
                Style::default().fg(self.theme.accent),
            )),
        ];
        frame.render_widget(
            Paragraph::new(summary).block(Block::default().borders(Borders::ALL)),
            chunks[0],
        );

        let gauge_color = if listing.moq_met() {
            self.theme.success
        } else {
            self.theme.warning
        };
        let gauge = Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Group Buy Progress"),
            )
            .gauge_style(Style::default().fg(gauge_color))
            .ratio(listing.group_progress_ratio())
            .label(format!(
                "{}/{} kg — {}",
                listing.group_progress_kg,
                listing.moq_kg,
                listing.group_status()
            ));
        frame.render_widget(gauge, chunks[1]);

        let rows: Vec<Row> = pricing::breakdown(listing)
            .into_iter()
            .map(|component| {
                let style = if component.kind == ComponentKind::Total {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                let value = component.display_value();
                Row::new(vec![Cell::from(component.label), Cell::from(value)])
                .style(style)
            })
            .collect();
        let table = Table::new(rows, [Constraint::Percentage(60), Constraint::Percentage(40)])
            .header(
                Row::new(vec!["Component", "Value (RM/kg)"])
                    .style(Style::default().fg(self.theme.muted)),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Pricing Breakdown"),
            );
        frame.render_widget(table, chunks[2]);

        let subtotal = self.shop.subtotal().unwrap_or_default();
        let order = vec![
            Line::from(format!("Quantity (kg): {}   (+/- to change)", self.shop.quantity_kg())),
            Line::from(Span::styled(
                format!("Subtotal: RM {subtotal:.2}"),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "g Join Group   b Direct Buy   Esc ← Back",
                Style::default().fg(self.theme.muted),
            )),
        ];
        frame.render_widget(
            Paragraph::new(order)
                .block(Block::default().borders(Borders::ALL).title("Order"))
                .wrap(Wrap { trim: true }),
            chunks[3],
        );
    }

    fn draw_discover(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(6),
                Constraint::Length(8),
            ])
            .split(area);

        let bars: Vec<(&str, u64)> = self
            .dashboard
            .monthly_sales
            .iter()
            .map(|month| (month.month.as_str(), month.amount_myr))
            .collect();
        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title("Monthly Sales"))
            .data(bars.as_slice())
            .bar_width(7)
            .bar_gap(2)
            .bar_style(Style::default().fg(self.theme.accent))
            .value_style(
                Style::default()
                    .fg(Color::Black)
                    .bg(self.theme.accent),
            )
            .max(self.dashboard.peak_sales());
        frame.render_widget(chart, chunks[0]);

        let metric = Paragraph::new(Line::from(vec![
            Span::styled("Monthly Sales Value ", Style::default().fg(self.theme.muted)),
            Span::styled(
                format_myr(self.dashboard.monthly_sales_value()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(metric, chunks[1]);

        let inventory: Vec<Row> = self
            .dashboard
            .inventory
            .iter()
            .map(|row| {
                Row::new(vec![
                    row.animal.label().to_string(),
                    row.live_head.to_string(),
                    row.butchered_head.to_string(),
                    row.meat_kg.to_string(),
                ])
            })
            .collect();
        let inventory = Table::new(inventory, [Constraint::Percentage(25); 4])
            .header(
                Row::new(vec!["Animal", "Live", "Butchered", "Meat(kg)"])
                    .style(Style::default().fg(self.theme.muted)),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Inventory Overview"),
            );
        frame.render_widget(inventory, chunks[2]);

        let supply: Vec<Row> = self
            .dashboard
            .supply
            .iter()
            .map(|row| {
                Row::new(vec![
                    row.animal.label().to_string(),
                    row.item.clone(),
                    row.quantity.to_string(),
                    row.unit.clone(),
                ])
            })
            .collect();
        let supply = Table::new(supply, [Constraint::Percentage(25); 4])
            .header(
                Row::new(vec!["Animal", "Item", "Qty", "Unit"])
                    .style(Style::default().fg(self.theme.muted)),
            )
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Farm Supply Overview"),
            );
        frame.render_widget(supply, chunks[3]);
    }

    fn draw_wallet(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(1),
            ])
            .split(area);

        let balances = vec![
            Line::from(vec![
                Span::raw("Cash (MYR) "),
                Span::styled(
                    format_amount(self.shop.balance(), 2),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Coupon: ", Style::default().fg(Color::Blue)),
                Span::raw(format!("MYR {DEMO_COUPON_MYR} (demo)")),
            ]),
            Line::from(vec![
                Span::styled("Points: ", Style::default().fg(self.theme.success)),
                Span::raw(format!("{DEMO_POINTS} (demo)")),
            ]),
        ];
        frame.render_widget(
            Paragraph::new(balances).block(Block::default().borders(Borders::ALL).title("Balances")),
            chunks[0],
        );

        let cursor = self.state.wallet_cursor.min(self.top_ups.len().saturating_sub(1));
        let tabs = Tabs::new(
            self.top_ups
                .iter()
                .map(|amount| format!("RM {amount}"))
                .collect::<Vec<_>>(),
        )
        .block(Block::default().borders(Borders::ALL).title("Top up"))
        .select(cursor)
        .highlight_style(
            Style::default()
                .fg(self.theme.accent)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        frame.render_widget(tabs, chunks[1]);

        let caption = Paragraph::new("Top-ups are simulated for the demo. ←/→ choose, Enter to top up.")
            .style(Style::default().fg(self.theme.muted))
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(caption, chunks[2]);
    }

    fn render_status(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Status");
        let text = match self.state.status_at {
            Some(at) => format!("[{}] {}", at.format("%H:%M:%S"), self.state.status),
            None => self.state.status.clone(),
        };
        let paragraph = Paragraph::new(Line::from(text))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal.show_cursor()?;
    Ok(())
}

fn spawn_input_thread(sender: mpsc::Sender<AppEvent>) {
    thread::spawn(move || loop {
        match event::poll(TICK_RATE) {
            Ok(true) => match event::read() {
                Ok(evt) => {
                    if sender.blocking_send(AppEvent::Input(evt)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            },
            Ok(false) => {
                if sender.blocking_send(AppEvent::Tick).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });
}

/// Balance with thousands separators and a fixed number of decimals.
fn format_amount(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (whole, fraction) = match rendered.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (rendered.as_str(), None),
    };
    let grouped = whole
        .parse::<u64>()
        .map(group_thousands)
        .unwrap_or_else(|_| whole.to_string());
    let sign = if value < 0.0 { "-" } else { "" };
    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}

struct UiState {
    page: Page,
    cursor: usize,
    sort_key: SortKey,
    wallet_cursor: usize,
    status: String,
    status_at: Option<DateTime<Local>>,
    should_quit: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            page: Page::Shop,
            cursor: 0,
            sort_key: SortKey::default(),
            wallet_cursor: 0,
            status: "Ready".to_string(),
            status_at: None,
            should_quit: false,
        }
    }
}

impl UiState {
    fn set_status(&mut self, message: String) {
        info!(status = %message, "Status");
        self.status = message;
        self.status_at = Some(Local::now());
    }

    fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    fn move_cursor(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }
}
