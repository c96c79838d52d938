use crossterm::event::{KeyEvent, KeyEventKind};

use nodelens_tui::widgets::notice::Notice;

use crate::command::Command;
use crate::event::AppEvent;
use crate::keybindings;
use crate::view::{ContextSelectView, DetailRequest, DetailView, PodSearchView, SearchPhase, View};

use super::App;

enum SelectTarget {
    Group,
    Pod,
    Context,
}

impl App {
    pub(super) fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Tick => {
                self.notices.retain(|n| !n.is_expired());
                self.dirty = true;
            }
            AppEvent::Resize(_, _) => {
                self.force_clear = true;
                self.dirty = true;
            }
            AppEvent::Data(data) => self.handle_data(data),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if let Some(cmd) = keybindings::command_for(&self.view, &key) {
            self.handle_command(cmd);
        }
    }

    pub(super) fn handle_command(&mut self, cmd: Command) {
        let changed = match cmd {
            Command::Quit => {
                self.running = false;
                true
            }
            Command::Back | Command::SearchCancel => self.go_back(),
            Command::CursorUp => self.cursor_up(),
            Command::CursorDown => self.cursor_down(),
            Command::Select => self.select(),
            Command::OpenPodSearch => self.open_pod_search(),
            Command::OpenContextSelect => self.open_context_select(),
            Command::Refresh => self.refresh_main(),
            Command::ShowHostNode => self.show_host_node(),
            Command::SearchChar(c) => self.edit_pattern(|pattern| pattern.push(c)),
            Command::SearchBackspace => self.edit_pattern(|pattern| {
                pattern.pop();
            }),
            Command::SearchSubmit => self.submit_search(),
        };
        if changed {
            self.dirty = true;
        }
    }

    fn go_back(&mut self) -> bool {
        match self.take_view() {
            View::Main(main) => {
                self.view = View::Main(main);
                false
            }
            View::PodSearch(search) => {
                self.view = *search.back;
                true
            }
            View::ContextSelect(select) => {
                self.view = *select.back;
                true
            }
            View::Detail(detail) => {
                self.view = *detail.back;
                true
            }
        }
    }

    fn cursor_up(&mut self) -> bool {
        match &mut self.view {
            View::Main(main) => main.cursor.up(),
            View::PodSearch(search) => search.cursor.up(),
            View::ContextSelect(select) => select.cursor.up(),
            View::Detail(detail) => detail.cursor.up(),
        }
    }

    fn cursor_down(&mut self) -> bool {
        match &mut self.view {
            View::Main(main) => {
                let len = main.groups.len();
                main.cursor.down(len)
            }
            View::PodSearch(search) => {
                let len = search.results.len();
                search.cursor.down(len)
            }
            View::ContextSelect(select) => {
                let len = select.contexts.len();
                select.cursor.down(len)
            }
            View::Detail(detail) => {
                let len = detail.content.len();
                detail.cursor.down(len)
            }
        }
    }

    fn select(&mut self) -> bool {
        let target = match &self.view {
            View::Main(_) => SelectTarget::Group,
            View::PodSearch(search) if search.phase == SearchPhase::Results => SelectTarget::Pod,
            View::ContextSelect(_) => SelectTarget::Context,
            _ => return false,
        };
        match target {
            SelectTarget::Group => self.open_group_detail(),
            SelectTarget::Pod => self.open_pod_detail(),
            SelectTarget::Context => self.confirm_context(),
        }
    }

    fn open_group_detail(&mut self) -> bool {
        let View::Main(main) = &self.view else { return false };
        let Some(group) = main.cursor.selected.and_then(|i| main.groups.get(i)).map(|g| g.name.clone()) else {
            return false;
        };

        let back = self.take_view();
        self.view = View::Detail(DetailView::nodes(
            format!("Nodes: {group}"),
            DetailRequest::GroupNodes { group },
            back,
        ));
        self.request_nodes();
        true
    }

    fn open_pod_detail(&mut self) -> bool {
        let View::PodSearch(search) = &self.view else { return false };
        let Some(pod) = search.cursor.selected.and_then(|i| search.results.get(i)).cloned() else {
            return false;
        };

        let back = self.take_view();
        self.view = View::Detail(DetailView::pod(&pod, back));
        true
    }

    fn show_host_node(&mut self) -> bool {
        let View::PodSearch(search) = &self.view else { return false };
        let Some(pod) = search.cursor.selected.and_then(|i| search.results.get(i)) else { return false };

        let Some(node) = pod.node.clone() else {
            self.notices
                .push(Notice::warning(format!("pod {} is not scheduled on a node", pod.name), self.notice_ttl));
            return true;
        };

        let back = self.take_view();
        self.view = View::Detail(DetailView::nodes(
            format!("Node: {node}"),
            DetailRequest::HostNode { node },
            back,
        ));
        self.request_nodes();
        true
    }

    fn confirm_context(&mut self) -> bool {
        let View::ContextSelect(select) = &self.view else { return false };
        let Some(entry) = select.cursor.selected.and_then(|i| select.contexts.get(i)).cloned() else {
            return false;
        };

        if entry.is_current {
            return self.go_back();
        }
        if let View::ContextSelect(select) = &mut self.view {
            select.loading = true;
        }
        self.request_switch(entry.name);
        true
    }

    fn open_pod_search(&mut self) -> bool {
        let back = self.take_view();
        self.view = View::PodSearch(PodSearchView::open(back));
        true
    }

    fn open_context_select(&mut self) -> bool {
        let back = self.take_view();
        self.view = View::ContextSelect(ContextSelectView::open(back));
        self.request_contexts();
        true
    }

    fn refresh_main(&mut self) -> bool {
        let View::Main(main) = &mut self.view else { return false };
        main.error = None;
        if main.groups.is_empty() {
            main.loading = true;
        }
        self.request_node_groups(true);
        true
    }

    fn edit_pattern(&mut self, edit: impl FnOnce(&mut String)) -> bool {
        let View::PodSearch(search) = &mut self.view else { return false };
        if search.phase != SearchPhase::Typing {
            return false;
        }
        edit(&mut search.pattern);
        true
    }

    fn submit_search(&mut self) -> bool {
        let View::PodSearch(search) = &mut self.view else { return false };
        if search.pattern.is_empty() {
            return false;
        }
        search.phase = SearchPhase::Results;
        search.loading = true;
        search.error = None;
        let pattern = search.pattern.clone();
        self.request_pods(pattern);
        true
    }
}
